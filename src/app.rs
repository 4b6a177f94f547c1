//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current screen and
//! any pending notice; `app::location` is the navigation address format.

mod location;
mod model;

pub use location::Location;
pub use model::*;
