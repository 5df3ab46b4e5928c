//! Track source resolution.
//!
//! The track list is fixed for the lifetime of the process: either the
//! configured list of files, or a scan of the library directory.

mod scan;

pub use scan::{resolve_sources, scan};
