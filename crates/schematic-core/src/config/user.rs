use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchematicError};

/// User-level configuration loaded from `~/.config/schematic/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Default for per-file progress output, overridden by the project
    /// config and the SCHEMATIC_VERBOSE environment variable.
    pub verbose: Option<bool>,
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("schematic").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    let path = match config_path() {
        Some(p) => p,
        None => return Ok(None),
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| SchematicError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content)
        .map_err(|e| SchematicError::ConfigParse { path, source: e })?;

    Ok(Some(config))
}
