//! Desktop special folder lookup.
//!
//! # Platform Behavior
//! - **Windows**: `SHGetKnownFolderPath(FOLDERID_Desktop)`, which follows
//!   folder redirection (OneDrive, roaming profiles)
//! - **Other**: `dirs::desktop_dir()` (XDG user dirs on Linux)

use std::path::PathBuf;
use tracing::debug;

use crate::shortcut::ShortcutError;

/// Resolve the current user's desktop directory.
#[cfg(windows)]
pub fn desktop_dir() -> Result<PathBuf, ShortcutError> {
    use windows::Win32::System::Com::CoTaskMemFree;
    use windows::Win32::UI::Shell::{FOLDERID_Desktop, SHGetKnownFolderPath, KF_FLAG_DEFAULT};

    let path = unsafe {
        let raw = SHGetKnownFolderPath(&FOLDERID_Desktop, KF_FLAG_DEFAULT, None)
            .map_err(|_| ShortcutError::DesktopNotFound)?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.0 as *const _));
        path.map_err(|_| ShortcutError::DesktopNotFound)?
    };

    debug!("Desktop folder: {}", path);
    Ok(PathBuf::from(path))
}

/// Resolve the current user's desktop directory.
#[cfg(not(windows))]
pub fn desktop_dir() -> Result<PathBuf, ShortcutError> {
    let path = dirs::desktop_dir().ok_or(ShortcutError::DesktopNotFound)?;
    debug!("Desktop folder: {}", path.display());
    Ok(path)
}
