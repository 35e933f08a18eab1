use crate::error_handling::types::ConfigError;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up inside the configuration directory.
pub const CONFIG_FILE: &str = "naswho.toml";

/// Runtime configuration loaded from `<config_dir>/naswho.toml`.
///
/// Every key carries a compiled-in default so a minimal (even empty) file is
/// valid. The file itself is mandatory: a missing or malformed file is a
/// fatal configuration error.
///
/// # Fields Overview
///
/// - `session_log`: path of the binary session log written by the accounting
///   subsystem. Opened read-only, never written.
/// - `profile_dir`: directory holding per-user profile files or programs
///   served by the query responder before delegating.
/// - `finger_program`: the system-level responder the query responder
///   delegates to when no local profile answers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_session_log")]
    pub session_log: PathBuf,

    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,

    #[serde(default = "default_finger_program")]
    pub finger_program: PathBuf,
}

fn default_session_log() -> PathBuf {
    PathBuf::from("/var/log/naswho/session.log")
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from("/usr/local/lib/finger")
}

fn default_finger_program() -> PathBuf {
    PathBuf::from("/usr/bin/finger")
}

impl Config {
    /// Loads the configuration from `dir/naswho.toml`.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        debug!("Reading configuration from {}", path.display());

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;

        info!("Configuration imported from {}", path.display());
        Ok(config)
    }
}
