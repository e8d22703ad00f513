//! The desktop shortcut routine.

use std::path::PathBuf;
use tracing::{info, warn};

use super::descriptor::{ShortcutDescriptor, ShortcutError};
use super::writer::LinkWriter;

/// Extension of the platform's native shortcut files.
#[cfg(windows)]
pub const SHORTCUT_EXTENSION: &str = "lnk";
#[cfg(not(windows))]
pub const SHORTCUT_EXTENSION: &str = "desktop";

/// Characters the Windows shell refuses in file names.
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Creates shortcuts inside one desktop directory.
pub struct ShortcutCreator {
    desktop_dir: PathBuf,
    writer: Box<dyn LinkWriter>,
}

impl ShortcutCreator {
    pub fn new(desktop_dir: impl Into<PathBuf>, writer: Box<dyn LinkWriter>) -> Self {
        Self {
            desktop_dir: desktop_dir.into(),
            writer,
        }
    }

    /// `<desktop>/<name>.<ext>`, after checking `name` is a plain file name.
    pub fn shortcut_path(&self, name: &str) -> Result<PathBuf, ShortcutError> {
        validate_name(name)?;
        Ok(self
            .desktop_dir
            .join(format!("{}.{}", name, SHORTCUT_EXTENSION)))
    }

    /// Write the shortcut and return where it landed.
    ///
    /// An existing shortcut with the same name is replaced.
    pub fn create(
        &self,
        name: &str,
        descriptor: &ShortcutDescriptor,
    ) -> Result<PathBuf, ShortcutError> {
        let path = self.shortcut_path(name)?;
        descriptor.validate()?;

        if !self.desktop_dir.is_dir() {
            return Err(ShortcutError::DesktopUnavailable(self.desktop_dir.clone()));
        }
        if !descriptor.target_path.exists() {
            warn!(
                "Shortcut target does not exist: {}",
                descriptor.target_path.display()
            );
        }

        self.writer.save(descriptor, &path)?;

        info!(
            "Created shortcut {} -> {}",
            path.display(),
            descriptor.target_path.display()
        );
        Ok(path)
    }
}

fn validate_name(name: &str) -> Result<(), ShortcutError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name
            .chars()
            .any(|c| c.is_control() || RESERVED_CHARS.contains(&c));

    if invalid {
        Err(ShortcutError::InvalidName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}
