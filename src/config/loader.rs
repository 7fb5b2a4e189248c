use std::path::Path;

use crate::args::DEFAULT_CONFIG_FILES;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|err| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            }),
            Self::Json => serde_json::from_str(content).map_err(|err| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }
}

/// Loads the config named by `--config`, or else the first of
/// `tamperx.toml` / `tamperx.json` present in the working directory.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return load_config_file(Path::new(path)).map(Some);
    }

    let Some(found) = DEFAULT_CONFIG_FILES
        .into_iter()
        .map(Path::new)
        .find(|candidate| candidate.exists())
    else {
        return Ok(None);
    };
    tracing::debug!("Using config file {}", found.display());
    load_config_file(found).map(Some)
}

/// Parses a single config file, choosing the format by extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, does not parse, or has an
/// extension other than `.toml` or `.json`.
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    format.parse(path, &content).map_err(AppError::config)
}
