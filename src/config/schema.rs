use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub remote: RemoteSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory the track list is resolved against.
    pub dir: String,
    /// Fixed, ordered list of sources. Relative entries are joined onto `dir`.
    pub tracks: Vec<String>,
    /// When `tracks` is empty, scan `dir` for files with these extensions.
    pub scan_when_empty: bool,
    /// File extensions picked up by the scan (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether the scan includes hidden files and directories.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: "media".to_string(),
            tracks: (1..=4).map(|i| format!("test{i}.mp3")).collect(),
            scan_when_empty: true,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Interval between time-advance reports while playing (milliseconds).
    pub tick_ms: u64,
    /// Volume every player starts with, `0.0..=1.0`.
    pub initial_volume: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            initial_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percent of the track moved per scrub key press.
    pub scrub_step: f64,
    /// Volume percent changed per key press.
    pub volume_step: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_step: 5.0,
            volume_step: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Whether to start the remote command service at all.
    pub enabled: bool,
    /// Well-known session bus name to claim.
    pub bus_name: String,
    /// Object path the command interface is served at.
    pub object_path: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bus_name: "org.encore.Remote".to_string(),
            object_path: "/org/encore/Remote".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter, e.g. `info` or `encore=debug`.
    pub level: String,
    /// Directory for log files. Defaults to the XDG state directory.
    pub directory: Option<String>,
    /// Number of rotated log files to keep.
    pub keep_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            keep_files: 3,
        }
    }
}
