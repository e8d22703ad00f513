//! Platform-specific module for Windows shell integration.
//!
//! This module contains the desktop folder lookup, message dialogs and,
//! on Windows, the COM-backed shortcut writer.

#[cfg(windows)]
pub mod com;
pub mod desktop;
pub mod dialog;

#[cfg(windows)]
pub use com::{ComGuard, ShellLinkWriter};
pub use desktop::desktop_dir;

use crate::shortcut::LinkWriter;

/// The writer used when none is requested: the shell on Windows, a desktop
/// entry elsewhere.
pub fn default_writer() -> Box<dyn LinkWriter> {
    #[cfg(windows)]
    {
        Box::new(ShellLinkWriter::new())
    }
    #[cfg(unix)]
    {
        native_writer()
    }
}

/// The writer that produces the shortcut file itself, without the shell.
pub fn native_writer() -> Box<dyn LinkWriter> {
    #[cfg(windows)]
    {
        Box::new(crate::shortcut::NativeLinkWriter::new())
    }
    #[cfg(unix)]
    {
        Box::new(crate::shortcut::DesktopEntryWriter::new())
    }
}
