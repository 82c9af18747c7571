use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Settings;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read and parse a settings file.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let settings: Settings = toml::from_str(&text)?;
    Ok(settings)
}

/// Settings from `path` when given, built-in defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}
