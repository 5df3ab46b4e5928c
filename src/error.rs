use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort startup or surface from the runtime.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logger initialization error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No playable tracks configured")]
    EmptyLibrary,
}

/// Failure to turn a media source into a playable sink.
///
/// The engine never propagates this to the UI thread as an error; it is
/// rendered into a `Halted` observation for the affected track.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}
