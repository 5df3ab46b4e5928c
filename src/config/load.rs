use std::{env, path::PathBuf};

use crate::error::Error;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `ENCORE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, Error> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.playback.tick_ms < 10 {
            return invalid("playback.tick_ms must be >= 10");
        }
        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return invalid("playback.initial_volume must be within 0.0..=1.0");
        }
        for (name, step) in [
            ("controls.scrub_step", self.controls.scrub_step),
            ("controls.volume_step", self.controls.volume_step),
        ] {
            if !(step > 0.0 && step <= 100.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within (0, 100]"
                )));
            }
        }
        if self.remote.enabled {
            if self.remote.bus_name.trim().is_empty() {
                return invalid("remote.bus_name must not be empty");
            }
            if !self.remote.object_path.starts_with('/') {
                return invalid("remote.object_path must start with '/'");
            }
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("encore").join("config.toml"))
}

/// Default log directory: `$XDG_STATE_HOME/encore/logs` or
/// `~/.local/state/encore/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("encore").join("logs"))
}
