mod actions;
mod api;
mod app;
mod beatmaps;
mod config;
mod preview;
mod request;
mod runtime;
mod search;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
