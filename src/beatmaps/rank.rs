use super::model::Beatmap;

/// Order beatmaps by descending play count. The sort is stable, so equal
/// counts keep backend order.
pub fn rank(beatmaps: &mut [Beatmap]) {
    beatmaps.sort_by(|a, b| b.play_count.total_cmp(&a.play_count));
}
