//! WeChat File Organizer - desktop shortcut
//!
//! Places a shortcut on the user's desktop that launches the organizer's
//! batch file from the directory the tool was run in.
//!
//! ## Features
//!
//! - Resolve the desktop special folder (known folder API on Windows)
//! - Build the shortcut from fixed defaults, a JSON config or overrides
//! - Save through the Windows shell, or write the shell link directly
//! - Freedesktop `.desktop` launchers outside Windows
//! - Read existing `.lnk` files back for inspection
//! - Confirmation dialog once the shortcut exists

pub mod config;
pub mod platform;
pub mod shortcut;

pub use config::{ConfigError, ShortcutConfig};
pub use platform::{default_writer, desktop_dir, native_writer};
pub use shortcut::{
    inspect, IconLocation, LinkSummary, LinkWriter, ShortcutCreator, ShortcutDescriptor,
    ShortcutError,
};
