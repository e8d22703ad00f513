//! End-to-end shortcut creation against temporary desktops.
//!
//! Written shortcuts are read back with an independent parser: `lnk` for
//! shell links on Windows, a plain key file reader for desktop entries.

use std::fs;
use std::path::{Path, PathBuf};

use desktop_shortcut_rs::config::{DEFAULT_BATCH_FILE, DEFAULT_DESCRIPTION, DEFAULT_NAME};
use desktop_shortcut_rs::shortcut::SHORTCUT_EXTENSION;
use desktop_shortcut_rs::{
    native_writer, ShortcutConfig, ShortcutCreator, ShortcutDescriptor, ShortcutError,
};

struct Fixture {
    _root: tempfile::TempDir,
    desktop: PathBuf,
    invocation_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let desktop = root.path().join("Desktop");
        let invocation_dir = root.path().join("整理器");
        fs::create_dir(&desktop).unwrap();
        fs::create_dir(&invocation_dir).unwrap();
        fs::write(
            invocation_dir.join(DEFAULT_BATCH_FILE),
            "@echo off\r\npython gui_organizer.py\r\n",
        )
        .unwrap();

        Self {
            _root: root,
            desktop,
            invocation_dir,
        }
    }

    fn create(&self) -> Result<PathBuf, ShortcutError> {
        create_in(&self.desktop, &self.invocation_dir)
    }

    fn shortcut_path(&self) -> PathBuf {
        self.desktop
            .join(format!("{}.{}", DEFAULT_NAME, SHORTCUT_EXTENSION))
    }
}

fn create_in(desktop: &Path, invocation_dir: &Path) -> Result<PathBuf, ShortcutError> {
    let config = ShortcutConfig::default();
    let descriptor = ShortcutDescriptor::for_invocation_dir(invocation_dir, &config);
    ShortcutCreator::new(desktop, native_writer()).create(&config.name, &descriptor)
}

fn entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[cfg(windows)]
mod read_back {
    use lnk::encoding::WINDOWS_1252;
    use std::path::Path;

    pub struct Shortcut {
        pub relative_path: Option<String>,
        pub working_dir: Option<String>,
        pub description: Option<String>,
        pub icon_location: Option<String>,
        pub icon_index: i32,
        pub file_size: u32,
        pub id_list_items: usize,
    }

    pub fn read(path: &Path) -> Shortcut {
        let link = lnk::ShellLink::open(path, WINDOWS_1252).unwrap();
        let strings = link.string_data();
        Shortcut {
            relative_path: strings.relative_path().clone(),
            working_dir: strings.working_dir().clone(),
            description: strings.name_string().clone(),
            icon_location: strings.icon_location().clone(),
            icon_index: *link.header().icon_index(),
            file_size: *link.header().file_size(),
            id_list_items: link
                .linktarget_id_list()
                .as_ref()
                .map_or(0, |list| list.id_list().len()),
        }
    }
}

#[cfg(unix)]
mod read_back {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    /// Keys of the `[Desktop Entry]` group, values unescaped.
    pub fn read(path: &Path) -> HashMap<String, String> {
        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("[Desktop Entry]"));

        lines
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.to_string(), unescape(value)))
            .collect()
    }

    fn unescape(value: &str) -> String {
        let mut out = String::new();
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }
}

#[test]
fn test_creates_one_shortcut_at_expected_path() {
    let fixture = Fixture::new();
    let path = fixture.create().unwrap();

    assert_eq!(path, fixture.shortcut_path());
    assert_eq!(entries(&fixture.desktop), vec![path]);
}

#[cfg(windows)]
#[test]
fn test_shortcut_points_at_batch_file_in_invocation_dir() {
    let fixture = Fixture::new();
    let link = read_back::read(&fixture.create().unwrap());

    // Computer and drive items, then one per path component below the root
    let components = fixture.invocation_dir.join(DEFAULT_BATCH_FILE).iter().count();
    assert_eq!(link.id_list_items, components);
    assert!(link
        .relative_path
        .as_deref()
        .is_some_and(|p| p.ends_with(DEFAULT_BATCH_FILE)));
    assert_eq!(
        link.working_dir.as_deref(),
        fixture.invocation_dir.to_str()
    );
    assert_eq!(link.description.as_deref(), Some(DEFAULT_DESCRIPTION));

    let system_root = std::env::var("SystemRoot").unwrap();
    assert_eq!(
        link.icon_location,
        Some(format!(r"{}\System32\shell32.dll", system_root))
    );
    assert_eq!(link.icon_index, 21);
    // The batch file exists, so the header describes it
    assert_eq!(link.file_size, 36);
}

#[cfg(unix)]
#[test]
fn test_shortcut_points_at_batch_file_in_invocation_dir() {
    let fixture = Fixture::new();
    let entry = read_back::read(&fixture.create().unwrap());

    let target = fixture.invocation_dir.join(DEFAULT_BATCH_FILE);
    assert_eq!(entry["Type"], "Application");
    assert_eq!(entry["Name"], DEFAULT_NAME);
    assert_eq!(entry["Exec"], target.to_string_lossy());
    assert_eq!(entry["Path"], fixture.invocation_dir.to_string_lossy());
    assert_eq!(entry["Comment"], DEFAULT_DESCRIPTION);
    assert_eq!(entry["Icon"], r"%SystemRoot%\System32\shell32.dll");
}

#[test]
fn test_rerun_overwrites_with_same_content() {
    let fixture = Fixture::new();
    let first = fixture.create().unwrap();
    let first_bytes = fs::read(&first).unwrap();

    let second = fixture.create().unwrap();

    assert_eq!(first, second);
    assert_eq!(entries(&fixture.desktop), vec![second.clone()]);
    assert_eq!(fs::read(&second).unwrap(), first_bytes);
}

#[test]
fn test_desktop_that_is_a_file_fails_cleanly() {
    let fixture = Fixture::new();
    let not_a_dir = fixture.desktop.join("notes.txt");
    fs::write(&not_a_dir, "keep me").unwrap();

    let err = create_in(&not_a_dir, &fixture.invocation_dir).unwrap_err();
    assert!(matches!(err, ShortcutError::DesktopUnavailable(_)));
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "keep me");
    assert_eq!(entries(&fixture.desktop), vec![not_a_dir]);
}

#[test]
fn test_failed_save_leaves_no_partial_file() {
    let fixture = Fixture::new();
    // A directory squatting on the shortcut name makes the final rename fail
    let blocker = fixture.shortcut_path();
    fs::create_dir(&blocker).unwrap();

    let err = fixture.create().unwrap_err();
    assert!(matches!(err, ShortcutError::Io { .. }));
    assert!(blocker.is_dir());
    assert_eq!(entries(&fixture.desktop), vec![blocker]);
}

#[cfg(windows)]
#[test]
fn test_missing_target_still_creates_shortcut() {
    let fixture = Fixture::new();
    let elsewhere = fixture.desktop.parent().unwrap().join("empty");
    fs::create_dir(&elsewhere).unwrap();

    let link = read_back::read(&create_in(&fixture.desktop, &elsewhere).unwrap());
    assert_eq!(link.file_size, 0);
    assert!(link.id_list_items > 0);
    assert_eq!(link.working_dir.as_deref(), elsewhere.to_str());
}

#[cfg(unix)]
#[test]
fn test_missing_target_still_creates_shortcut() {
    let fixture = Fixture::new();
    let elsewhere = fixture.desktop.parent().unwrap().join("empty");
    fs::create_dir(&elsewhere).unwrap();

    let entry = read_back::read(&create_in(&fixture.desktop, &elsewhere).unwrap());
    assert_eq!(
        entry["Exec"],
        elsewhere.join(DEFAULT_BATCH_FILE).to_string_lossy()
    );
}
