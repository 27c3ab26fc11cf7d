use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::level_filters::LevelFilter;

use crate::errors::ConfigError;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&file)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Find `config.json` next to the executable, one directory above it,
    /// or in the working directory, in that order.
    pub fn locate() -> Option<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(CONFIG_FILE));
            candidates.push(exe_dir.join("..").join(CONFIG_FILE));
        }
        candidates.push(PathBuf::from(CONFIG_FILE));

        candidates.into_iter().find(|p| p.exists())
    }

    /// Load the located config file, or fall back to defaults when there is none.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        match Self::locate() {
            Some(path) => Ok((Self::load_from_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}
