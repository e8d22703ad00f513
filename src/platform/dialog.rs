//! User-facing completion messages.
//!
//! On Windows these are modal message boxes that block until dismissed.
//! Elsewhere they are written to the console.

#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, MB_ICONERROR, MB_ICONINFORMATION, MB_OK, MB_SETFOREGROUND, MESSAGEBOX_STYLE,
};
#[cfg(windows)]
use windows_core::PCWSTR;

#[cfg(windows)]
fn message_box(title: &str, message: &str, style: MESSAGEBOX_STYLE) {
    unsafe {
        let msg_wide: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
        let title_wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
        MessageBoxW(
            None,
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_SETFOREGROUND | style,
        );
    }
}

/// Show an informational message and wait for the user.
pub fn show_info(title: &str, message: &str) {
    #[cfg(windows)]
    message_box(title, message, MB_ICONINFORMATION);

    #[cfg(not(windows))]
    println!("{}: {}", title, message);
}

/// Show an error message and wait for the user.
pub fn show_error(title: &str, message: &str) {
    #[cfg(windows)]
    message_box(title, message, MB_ICONERROR);

    #[cfg(not(windows))]
    eprintln!("{}: {}", title, message);
}
