//! Shortcut persistence backends.

use std::path::Path;
use tempfile::NamedTempFile;

use super::descriptor::{ShortcutDescriptor, ShortcutError};

/// Persists a descriptor as a shortcut file.
pub trait LinkWriter {
    /// Write `descriptor` to `path`, replacing any existing shortcut.
    fn save(&self, descriptor: &ShortcutDescriptor, path: &Path) -> Result<(), ShortcutError>;
}

/// Let `write` fill a temporary file next to `path`, then rename it into place.
///
/// When `write` or the rename fails the temporary file is removed, so no
/// partial shortcut is ever left on the desktop.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<(), ShortcutError>
where
    F: FnOnce(&Path) -> Result<(), ShortcutError>,
{
    let io_err = |source: std::io::Error| ShortcutError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let staged = NamedTempFile::new_in(dir).map_err(io_err)?.into_temp_path();
    write(&staged)?;
    staged.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
