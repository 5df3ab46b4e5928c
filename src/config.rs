//! Configuration loader and schema types.
//!
//! Settings drive the track list, engine cadence, key steps, the remote
//! command service and logging.

mod load;
mod schema;

pub use load::default_log_dir;
pub use schema::*;
