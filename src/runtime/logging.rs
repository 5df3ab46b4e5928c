use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{LoggingSettings, default_log_dir};
use crate::error::Error;

/// Start file logging. The terminal belongs to the TUI, so nothing is
/// duplicated to stderr. Keep the returned handle alive until exit.
pub fn init(settings: &LoggingSettings) -> Result<LoggerHandle, Error> {
    let directory = settings
        .directory
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from("logs"));

    let handle = Logger::try_with_env_or_str(&settings.level)?
        .log_to_file(FileSpec::default().directory(directory).basename("encore"))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(settings.keep_files),
        )
        .duplicate_to_stderr(Duplicate::None)
        .start()?;

    Ok(handle)
}
