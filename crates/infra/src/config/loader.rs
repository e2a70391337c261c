//! Feed configuration loader
//!
//! Loads the calendar feed list from a TOML file.
//!
//! ## Loading Strategy
//! 1. `HOURGLASS_CONFIG` environment variable, when set
//! 2. Probes `hourglass.toml` / `calendars.toml` in the current directory,
//!    then in the parent and grandparent directories
//!
//! ## File Format
//! ```toml
//! [[calendars]]
//! name = "PhD"
//! url = "https://calendars.example/phd.ics"
//! color = "cadetblue"
//! theme = "Research"
//! goal_hours = 8.0
//! ```

use std::path::{Path, PathBuf};

use hourglass_domain::{FeedConfig, HourglassError, Result};

const ENV_CONFIG_PATH: &str = "HOURGLASS_CONFIG";
const CONFIG_FILE_NAMES: [&str; 2] = ["hourglass.toml", "calendars.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `HourglassError::Config` if no configuration file can be found,
/// read or parsed, and propagates validation failures.
pub fn load() -> Result<FeedConfig> {
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        tracing::info!(%path, "loading feed configuration from environment override");
        return load_from_path(Path::new(&path));
    }

    let path = probe_config_paths().ok_or_else(|| {
        HourglassError::Config(format!(
            "no feed configuration file found; set {ENV_CONFIG_PATH} or create hourglass.toml"
        ))
    })?;
    tracing::info!(path = %path.display(), "loading feed configuration");
    load_from_path(&path)
}

/// Load configuration from an explicit file path
///
/// # Errors
/// Returns `HourglassError::Config` when the file cannot be read or parsed;
/// propagates `FeedConfig::validate` failures.
pub fn load_from_path(path: &Path) -> Result<FeedConfig> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        HourglassError::Config(format!("cannot read config file {}: {err}", path.display()))
    })?;

    let config: FeedConfig = toml::from_str(&raw).map_err(|err| {
        HourglassError::Config(format!("invalid config file {}: {err}", path.display()))
    })?;

    config.validate()?;
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    let bases = [PathBuf::from("."), PathBuf::from(".."), PathBuf::from("../..")];

    for base in &bases {
        for name in CONFIG_FILE_NAMES {
            let candidate = base.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
