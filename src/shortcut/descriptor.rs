//! Shortcut data model.
//!
//! Defines the descriptor written to the desktop, the icon reference it
//! carries, and the error type shared by the shortcut module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::config::ShortcutConfig;

/// Longest description the shell accepts (`INFOTIPSIZE`).
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Everything needed to persist one shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutDescriptor {
    /// Absolute path of the program or batch file to launch
    pub target_path: PathBuf,

    /// Working directory of the launched process
    pub working_directory: PathBuf,

    /// Tooltip text
    pub description: String,

    /// Icon resource shown on the desktop
    pub icon: IconLocation,

    /// Command-line arguments passed to the target
    pub arguments: Option<String>,
}

impl ShortcutDescriptor {
    /// Build the descriptor for a launch from `invocation_dir`.
    ///
    /// Relative target and working directory settings resolve against the
    /// invocation directory; the working directory defaults to it.
    pub fn for_invocation_dir(invocation_dir: &Path, config: &ShortcutConfig) -> Self {
        let working_directory = match &config.working_dir {
            Some(dir) => invocation_dir.join(dir),
            None => invocation_dir.to_path_buf(),
        };

        Self {
            target_path: invocation_dir.join(&config.batch_file),
            working_directory,
            description: config.description.clone(),
            icon: config.icon.clone(),
            arguments: config.arguments.clone(),
        }
    }

    /// Check that every field is usable before anything is written.
    pub fn validate(&self) -> Result<(), ShortcutError> {
        if self.target_path.as_os_str().is_empty() {
            return Err(ShortcutError::InvalidDescriptor(
                "target path is empty".to_string(),
            ));
        }
        if !self.target_path.is_absolute() {
            return Err(ShortcutError::InvalidDescriptor(format!(
                "target path is not absolute: {}",
                self.target_path.display()
            )));
        }
        if !self.working_directory.is_absolute() {
            return Err(ShortcutError::InvalidDescriptor(format!(
                "working directory is not absolute: {}",
                self.working_directory.display()
            )));
        }
        let description_len = self.description.encode_utf16().count();
        if description_len > MAX_DESCRIPTION_LEN {
            return Err(ShortcutError::InvalidDescriptor(format!(
                "description is {} characters, limit is {}",
                description_len, MAX_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }
}

/// Icon resource: a file plus the index of the icon inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconLocation {
    pub path: String,
    #[serde(default)]
    pub index: i32,
}

impl IconLocation {
    pub fn new(path: impl Into<String>, index: i32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    /// Parse `path,index`. Without a numeric suffix the whole text is the path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some((path, index)) = s.rsplit_once(',') {
            if let Ok(index) = index.trim().parse::<i32>() {
                return Self::new(path.trim(), index);
            }
        }
        Self::new(s, 0)
    }

    /// The path with `%VAR%` references replaced from the environment.
    ///
    /// Unknown variables are left as written.
    pub fn expanded_path(&self) -> String {
        let mut expanded = String::with_capacity(self.path.len());
        let mut rest = self.path.as_str();

        while let Some(start) = rest.find('%') {
            let after = &rest[start + 1..];
            let Some(len) = after.find('%') else {
                break;
            };
            let name = &after[..len];

            expanded.push_str(&rest[..start]);
            match std::env::var(name) {
                Ok(value) => expanded.push_str(&value),
                _ => {
                    expanded.push('%');
                    expanded.push_str(name);
                    expanded.push('%');
                }
            }
            rest = &after[len + 1..];
        }

        expanded.push_str(rest);
        expanded
    }
}

impl Default for IconLocation {
    fn default() -> Self {
        Self::new(r"%SystemRoot%\System32\shell32.dll", 21)
    }
}

impl fmt::Display for IconLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.path, self.index)
    }
}

impl FromStr for IconLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Shortcut creation errors.
#[derive(Debug, Error)]
pub enum ShortcutError {
    #[error("Desktop folder could not be resolved")]
    DesktopNotFound,

    #[error("Desktop folder is not a usable directory: {}", .0.display())]
    DesktopUnavailable(PathBuf),

    #[error("Invalid shortcut name: {name:?}")]
    InvalidName { name: String },

    #[error("Invalid shortcut: {0}")]
    InvalidDescriptor(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read shell link {}: {source}", .path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: lnk::Error,
    },

    #[cfg(windows)]
    #[error("Failed to write shell link {}: {source}", .path.display())]
    NativeLink {
        path: PathBuf,
        #[source]
        source: mslnk::MSLinkError,
    },

    #[cfg(windows)]
    #[error("COM initialization failed: {0}")]
    ComInitFailed(windows::core::Error),

    #[cfg(windows)]
    #[error("Shell link call failed: {0}")]
    Shell(windows::core::Error),
}
