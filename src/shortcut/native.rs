//! Shell link files written directly, without the Windows shell.

use mslnk::{FileAttributeFlags, LinkFlags, ShellLink};
use std::fs;
use std::path::{Component, Path, Prefix};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::descriptor::{ShortcutDescriptor, ShortcutError};
use super::writer::{write_atomically, LinkWriter};

/// 100ns intervals between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

/// Builds the link with `mslnk` and stages it next to its destination.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLinkWriter;

impl NativeLinkWriter {
    pub fn new() -> Self {
        Self
    }
}

impl LinkWriter for NativeLinkWriter {
    fn save(&self, descriptor: &ShortcutDescriptor, path: &Path) -> Result<(), ShortcutError> {
        let link = shell_link_for(descriptor)?;

        write_atomically(path, |staged| {
            link.create_lnk(staged)
                .map_err(|source| ShortcutError::NativeLink {
                    path: path.to_path_buf(),
                    source,
                })
        })?;

        debug!("Wrote shell link {}", path.display());
        Ok(())
    }
}

/// Build the shell link for a descriptor.
///
/// The target is recorded as an item ID list. Header size, attributes and
/// timestamps come from the target when it exists and stay zero otherwise.
pub fn shell_link_for(descriptor: &ShortcutDescriptor) -> Result<ShellLink, ShortcutError> {
    let target = drive_path(&descriptor.target_path)?;
    let working_dir = drive_path(&descriptor.working_directory)?;

    let mut link = match ShellLink::new(target) {
        Ok(link) => link,
        Err(e) => {
            debug!("Linking to unreadable target {}: {}", target, e);
            ShellLink::default()
        }
    };
    if !link
        .header()
        .link_flags()
        .contains(LinkFlags::HAS_LINK_TARGET_ID_LIST)
    {
        if let Some(id_list) = link.linktarget_mut() {
            id_list.set_linktarget(target);
        }
        link.header_mut()
            .update_link_flags(LinkFlags::HAS_LINK_TARGET_ID_LIST, true);
    }

    link.set_working_dir(Some(working_dir.to_string()));
    link.set_name(Some(descriptor.description.clone()).filter(|d| !d.is_empty()));
    link.set_arguments(descriptor.arguments.clone());
    link.set_icon_location(Some(descriptor.icon.expanded_path()).filter(|p| !p.is_empty()));
    link.header_mut().set_icon_index(descriptor.icon.index);

    if let Ok(metadata) = fs::metadata(&descriptor.target_path) {
        let header = link.header_mut();
        header.set_file_attributes(if metadata.is_dir() {
            FileAttributeFlags::FILE_ATTRIBUTE_DIRECTORY
        } else {
            FileAttributeFlags::FILE_ATTRIBUTE_ARCHIVE
        });
        header.set_file_size(u32::try_from(metadata.len()).unwrap_or(u32::MAX));
        header.set_creation_time(metadata.created().map(filetime).unwrap_or(0));
        header.set_access_time(metadata.accessed().map(filetime).unwrap_or(0));
        header.set_write_time(metadata.modified().map(filetime).unwrap_or(0));
    }

    Ok(link)
}

/// Item ID lists start at a drive, so only `X:\...` paths can be linked.
fn drive_path(path: &Path) -> Result<&str, ShortcutError> {
    let on_drive = matches!(
        path.components().next(),
        Some(Component::Prefix(prefix)) if matches!(prefix.kind(), Prefix::Disk(_))
    );
    match path.to_str() {
        Some(s) if on_drive => Ok(s),
        _ => Err(ShortcutError::InvalidDescriptor(format!(
            "shell links need a drive-letter path: {}",
            path.display()
        ))),
    }
}

/// Convert to a FILETIME value, zero before the Unix epoch.
fn filetime(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| FILETIME_UNIX_EPOCH + (d.as_nanos() / 100) as u64)
        .unwrap_or(0)
}
