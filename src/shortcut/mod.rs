//! Desktop shortcut creation.
//!
//! A [`ShortcutDescriptor`] names what to launch; a [`ShortcutCreator`]
//! places it on the desktop through a [`LinkWriter`] backend.
//!
//! # Backends
//!
//! - `ShellLinkWriter` (Windows): goes through the shell's `IShellLinkW`
//!   COM object, see [`crate::platform`].
//! - `NativeLinkWriter` (Windows): builds the shell link with `mslnk`,
//!   without the shell.
//! - `DesktopEntryWriter` (Unix): writes a freedesktop `.desktop` launcher.
//!
//! File-based backends stage the shortcut next to its destination and rename
//! it into place.

mod creator;
mod descriptor;
#[cfg(unix)]
mod desktop_entry;
mod inspect;
#[cfg(windows)]
mod native;
mod writer;

pub use creator::{ShortcutCreator, SHORTCUT_EXTENSION};
pub use descriptor::{IconLocation, ShortcutDescriptor, ShortcutError, MAX_DESCRIPTION_LEN};
#[cfg(unix)]
pub use desktop_entry::{DesktopEntry, DesktopEntryWriter};
pub use inspect::{inspect, LinkSummary};
#[cfg(windows)]
pub use native::{shell_link_for, NativeLinkWriter};
pub use writer::LinkWriter;
