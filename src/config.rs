//! Shortcut settings.
//!
//! Built-in defaults describe the organizer launcher shortcut. A JSON file
//! may override any subset of them; missing keys keep their default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shortcut::IconLocation;

pub const DEFAULT_NAME: &str = "微信文件整理器";
pub const DEFAULT_BATCH_FILE: &str = "启动整理器.bat";
pub const DEFAULT_DESCRIPTION: &str = "微信文件整理器 - 一键整理微信接收的文件";

/// Settings for the shortcut to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Shortcut file name without extension
    pub name: String,

    /// Batch file to launch, relative to the invocation directory
    pub batch_file: String,

    /// Working directory, defaults to the invocation directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    pub description: String,

    pub icon: IconLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,

    /// Tracing filter directive, e.g. "debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            batch_file: DEFAULT_BATCH_FILE.to_string(),
            working_dir: None,
            description: DEFAULT_DESCRIPTION.to_string(),
            icon: IconLocation::default(),
            arguments: None,
            log_level: None,
        }
    }
}

/// Config file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ShortcutConfig {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}
