//! Shortcut persistence through the Windows shell.
//!
//! Uses the `ShellLink` COM class, the same object scripting hosts drive,
//! so the resulting file is exactly what Explorer would write.

use std::path::Path;
use tracing::debug;
use windows::Win32::Foundation::TRUE;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
    COINIT_APARTMENTTHREADED,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};
use windows_core::{Interface, PCWSTR};

use crate::shortcut::{LinkWriter, ShortcutDescriptor, ShortcutError};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, ShortcutError> {
        unsafe {
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(ShortcutError::ComInitFailed)?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Saves shortcuts with `IShellLinkW` + `IPersistFile`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellLinkWriter;

impl ShellLinkWriter {
    pub fn new() -> Self {
        Self
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn path_to_wide(path: &Path) -> Vec<u16> {
    to_wide(&path.to_string_lossy())
}

impl LinkWriter for ShellLinkWriter {
    fn save(&self, descriptor: &ShortcutDescriptor, path: &Path) -> Result<(), ShortcutError> {
        let _com = ComGuard::new()?;

        let target = path_to_wide(&descriptor.target_path);
        let working_dir = path_to_wide(&descriptor.working_directory);
        let description = to_wide(&descriptor.description);
        let icon_path = to_wide(&descriptor.icon.path);
        let destination = path_to_wide(path);

        unsafe {
            let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)
                .map_err(ShortcutError::Shell)?;

            link.SetPath(PCWSTR::from_raw(target.as_ptr()))
                .map_err(ShortcutError::Shell)?;
            link.SetWorkingDirectory(PCWSTR::from_raw(working_dir.as_ptr()))
                .map_err(ShortcutError::Shell)?;
            link.SetDescription(PCWSTR::from_raw(description.as_ptr()))
                .map_err(ShortcutError::Shell)?;
            link.SetIconLocation(PCWSTR::from_raw(icon_path.as_ptr()), descriptor.icon.index)
                .map_err(ShortcutError::Shell)?;

            if let Some(arguments) = &descriptor.arguments {
                let arguments = to_wide(arguments);
                link.SetArguments(PCWSTR::from_raw(arguments.as_ptr()))
                    .map_err(ShortcutError::Shell)?;
            }

            let file: IPersistFile = link.cast().map_err(ShortcutError::Shell)?;
            file.Save(PCWSTR::from_raw(destination.as_ptr()), TRUE)
                .map_err(ShortcutError::Shell)?;
        }

        debug!("Shell saved {}", path.display());
        Ok(())
    }
}
