use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::api::ApiError;
use crate::app::Location;

fn track(name: &str, artist: &str) -> Track {
    Track {
        name: name.into(),
        artist: Some(artist.into()),
        ..Track::default()
    }
}

fn typed(screen: &mut SearchScreen, text: &str, now: Instant) {
    for c in text.chars() {
        screen.push_char(c, now);
    }
}

#[test]
fn blank_query_issues_nothing_and_clears_results() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, "ab", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();
    assert!(s.apply_outcome(ticket, Ok(vec![track("Old", "Result")])));

    s.pop_char(now);
    s.pop_char(now);
    typed(&mut s, "   ", now);
    assert!(s.due_dispatch(now).is_none());
    assert!(s.results.is_empty());
    assert!(!s.loading);
}

#[test]
fn clearing_the_query_cancels_the_request_in_flight() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, "abc", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();

    s.clear_query(now);
    assert!(!s.loading);
    assert!(!s.apply_outcome(ticket, Ok(vec![track("Late", "Arrival")])));
    assert!(s.results.is_empty());
}

#[test]
fn non_empty_query_marks_loading_and_dispatches_trimmed_text() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, "  imagine ", now);

    assert!(s.loading);
    let (_, q) = s.due_dispatch(now).unwrap();
    assert_eq!(q, "imagine");
    // Only one dispatch per query value.
    assert!(s.due_dispatch(now).is_none());
}

#[test]
fn whitespace_edits_do_not_rerun_the_effect() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, "abba", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();

    s.push_char(' ', now);
    assert!(s.due_dispatch(now).is_none());
    assert!(s.apply_outcome(ticket, Ok(vec![track("Waterloo", "ABBA")])));
    assert_eq!(s.results.len(), 1);
}

#[test]
fn debounce_holds_dispatch_until_quiet() {
    let t0 = Instant::now();
    let mut s = SearchScreen::new(Duration::from_millis(150));
    typed(&mut s, "ab", t0);

    assert!(s.due_dispatch(t0 + Duration::from_millis(100)).is_none());
    assert_eq!(
        s.next_deadline(t0 + Duration::from_millis(100)),
        Some(Duration::from_millis(50))
    );

    s.push_char('c', t0 + Duration::from_millis(100));
    assert!(s.due_dispatch(t0 + Duration::from_millis(200)).is_none());
    let (_, q) = s.due_dispatch(t0 + Duration::from_millis(250)).unwrap();
    assert_eq!(q, "abc");
}

#[test]
fn rapid_edits_only_let_the_final_query_populate_results() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);

    let mut tickets = Vec::new();
    for c in "imag".chars() {
        s.push_char(c, now);
        tickets.push(s.due_dispatch(now).unwrap().0);
    }
    let last = *tickets.last().unwrap();

    // Earlier responses arrive late and in any order; none may land.
    for t in tickets[..tickets.len() - 1].iter().rev() {
        assert!(!s.apply_outcome(*t, Ok(vec![track("Stale", "Result")])));
        assert!(s.results.is_empty());
        assert!(s.loading);
    }

    assert!(s.apply_outcome(last, Ok(vec![track("Imagine", "John Lennon")])));
    assert_eq!(s.results, vec![track("Imagine", "John Lennon")]);
    assert!(!s.loading);
}

#[test]
fn failed_search_clears_results_and_loading() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    s.results = vec![track("Old", "Result")];
    typed(&mut s, "x", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();

    let err = ApiError::Status {
        endpoint: "/search".into(),
        status: 502,
    };
    assert!(s.apply_outcome(ticket, Err(err)));
    assert!(s.results.is_empty());
    assert!(!s.loading);
}

#[test]
fn selecting_a_track_navigates_with_encoded_title_and_artist() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, "imagine", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();
    s.apply_outcome(ticket, Ok(vec![track("Imagine", "John Lennon")]));

    let target = s.navigation_target().unwrap();
    assert_eq!(
        target.to_string(),
        "/osu_beatmaps?title=imagine&artist=John%20Lennon"
    );
    assert_eq!(target, Location::beatmaps("imagine", "John Lennon"));
}

#[test]
fn navigation_title_follows_the_query_the_results_came_from() {
    let now = Instant::now();
    let mut s = SearchScreen::new(Duration::ZERO);
    typed(&mut s, " imagine ", now);
    let (ticket, _) = s.due_dispatch(now).unwrap();
    s.apply_outcome(ticket, Ok(vec![track("Imagine", "John Lennon")]));

    // A newer query is in flight; the listed results still belong to "imagine".
    typed(&mut s, "x", now);
    assert!(s.loading);
    assert_eq!(
        s.navigation_target().unwrap().get("title"),
        Some("imagine")
    );
}

#[test]
fn navigation_passes_missing_artist_as_empty() {
    let mut s = SearchScreen::new(Duration::ZERO);
    s.results = vec![Track {
        name: String::new(),
        ..Track::default()
    }];
    let target = s.navigation_target().unwrap();
    assert_eq!(target.to_string(), "/osu_beatmaps?title=&artist=");
}

#[test]
fn selection_stays_in_bounds() {
    let mut s = SearchScreen::new(Duration::ZERO);
    s.select_next();
    assert_eq!(s.selected, 0);

    s.results = vec![track("A", "1"), track("B", "2")];
    s.select_next();
    s.select_next();
    assert_eq!(s.selected, 1);
    s.select_prev();
    s.select_prev();
    assert_eq!(s.selected, 0);
}

#[test]
fn track_from_value_is_lenient() {
    let t = Track::from_value(&json!({
        "id": "4ofwffwvvnbSkrMSCKQDaC",
        "name": "Imagine",
        "artist": "John Lennon",
        "image": "https://i.scdn.co/image/abc",
        "preview": null,
        "spotifyUrl": "https://open.spotify.com/track/4ofwffwvvnbSkrMSCKQDaC"
    }));
    assert_eq!(t.name, "Imagine");
    assert_eq!(t.preview, None);
    assert_eq!(t.key(), "4ofwffwvvnbSkrMSCKQDaC");

    let odd = Track::from_value(&json!(42));
    assert_eq!(odd, Track::default());
    assert_eq!(odd.key(), "-");
}

#[test]
fn track_key_falls_back_to_name_and_artist() {
    assert_eq!(track("Imagine", "John Lennon").key(), "Imagine-John Lennon");
    let no_artist = Track {
        name: "Solo".into(),
        ..Track::default()
    };
    assert_eq!(no_artist.key(), "Solo-");
    assert_eq!(no_artist.display(), "Solo - Unknown artist");
}
