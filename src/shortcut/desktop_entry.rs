//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification a launcher
//! needs. Windows writes shell links instead.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::debug;

use super::descriptor::{ShortcutDescriptor, ShortcutError};
use super::writer::{write_atomically, LinkWriter};

/// Characters that force an `Exec` argument into double quotes.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// An application entry as written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Label under the icon
    pub name: String,
    /// Tooltip text
    pub comment: Option<String>,
    /// Command line, already quoted
    pub exec: String,
    /// Working directory of the launched process
    pub path: String,
    pub icon: Option<String>,
}

impl DesktopEntry {
    /// Entry launching the descriptor's target, labelled `name`.
    pub fn for_descriptor(name: &str, descriptor: &ShortcutDescriptor) -> Self {
        let mut exec = quote_exec_arg(&descriptor.target_path.to_string_lossy());
        if let Some(arguments) = &descriptor.arguments {
            exec.push(' ');
            exec.push_str(&arguments.replace('%', "%%"));
        }
        let icon = descriptor.icon.expanded_path();

        Self {
            name: name.to_string(),
            comment: Some(descriptor.description.clone()).filter(|d| !d.is_empty()),
            exec,
            path: descriptor.working_directory.to_string_lossy().into_owned(),
            icon: Some(icon).filter(|i| !i.is_empty()),
        }
    }

    /// Generate the .desktop file content.
    pub fn to_content(&self) -> String {
        let mut content = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(content, "[Desktop Entry]");
        let _ = writeln!(content, "Type=Application");
        let _ = writeln!(content, "Name={}", escape_value(&self.name));
        if let Some(comment) = &self.comment {
            let _ = writeln!(content, "Comment={}", escape_value(comment));
        }
        let _ = writeln!(content, "Exec={}", escape_value(&self.exec));
        let _ = writeln!(content, "Path={}", escape_value(&self.path));
        if let Some(icon) = &self.icon {
            let _ = writeln!(content, "Icon={}", escape_value(icon));
        }
        let _ = writeln!(content, "Terminal=false");

        content
    }
}

/// Writes freedesktop launchers, marked executable so desktops trust them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopEntryWriter;

impl DesktopEntryWriter {
    pub fn new() -> Self {
        Self
    }
}

impl LinkWriter for DesktopEntryWriter {
    fn save(&self, descriptor: &ShortcutDescriptor, path: &Path) -> Result<(), ShortcutError> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = DesktopEntry::for_descriptor(&name, descriptor).to_content();

        write_atomically(path, |staged| {
            let io_err = |source: std::io::Error| ShortcutError::Io {
                path: staged.to_path_buf(),
                source,
            };
            fs::write(staged, &content).map_err(io_err)?;
            fs::set_permissions(staged, fs::Permissions::from_mode(0o755)).map_err(io_err)
        })?;

        debug!("Wrote desktop entry {}", path.display());
        Ok(())
    }
}

/// Quote one `Exec` argument when it contains reserved characters.
fn quote_exec_arg(arg: &str) -> String {
    let escaped = arg.replace('%', "%%");
    if !escaped.contains(EXEC_RESERVED) {
        return escaped;
    }

    let mut quoted = String::with_capacity(escaped.len() + 2);
    quoted.push('"');
    for c in escaped.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escape a value for the key file format.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
