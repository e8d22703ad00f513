//! Reading existing shell links back.

use lnk::encoding::WINDOWS_1252;
use lnk::ShellLink;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use super::descriptor::ShortcutError;

/// The fields of a shell link that describe what it launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    /// Absolute target from the LinkInfo block, when the link has one
    pub target: Option<String>,
    pub relative_path: Option<String>,
    pub working_dir: Option<String>,
    /// Tooltip text
    pub description: Option<String>,
    pub arguments: Option<String>,
    pub icon_location: Option<String>,
    pub icon_index: i32,
    /// Whether the target is also recorded as an item ID list
    pub has_id_list: bool,
}

impl From<&ShellLink> for LinkSummary {
    fn from(link: &ShellLink) -> Self {
        let strings = link.string_data();
        Self {
            target: link.link_target(),
            relative_path: strings.relative_path().clone(),
            working_dir: strings.working_dir().clone(),
            description: strings.name_string().clone(),
            arguments: strings.command_line_arguments().clone(),
            icon_location: strings.icon_location().clone(),
            icon_index: *link.header().icon_index(),
            has_id_list: link.linktarget_id_list().is_some(),
        }
    }
}

/// Parse the shell link at `path`.
///
/// Non-Unicode links are decoded as Windows-1252.
pub fn inspect(path: &Path) -> Result<LinkSummary, ShortcutError> {
    let link = ShellLink::open(path, WINDOWS_1252).map_err(|source| ShortcutError::Inspect {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Parsed shell link {}", path.display());

    Ok(LinkSummary::from(&link))
}
