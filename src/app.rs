//! Application module: the UI-thread state the runtime and TUI work against.
//!
//! `App` lives in `app::model` and binds the transport controller and both
//! sync bridges to whichever track is selected.

mod model;

pub use model::*;
