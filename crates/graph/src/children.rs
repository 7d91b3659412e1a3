use crate::types::{TagOracle, VaultFile};
use ftags_protocol::{IgnoreRules, ItemIcon, CHILDREN_DISPLAY_LIMIT};

/// Extensions that get a dedicated icon; everything else is a plain file
const EXTENSION_ICONS: &[(ItemIcon, &[&str])] = &[(ItemIcon::Image, &["jpg", "png"])];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildListing {
    /// At most [`CHILDREN_DISPLAY_LIMIT`] children, in oracle order
    pub shown: Vec<VaultFile>,

    /// More children survived filtering than are shown
    pub overflowed: bool,
}

/// Direct children of `origin` that no ignore rule matches.
pub fn list_children<O: TagOracle + ?Sized>(
    oracle: &O,
    origin: &VaultFile,
    ignore: &IgnoreRules,
) -> ChildListing {
    let mut survivors = oracle
        .direct_children(origin)
        .into_iter()
        .filter(|child| !ignore.is_ignored(&child.path));

    let shown: Vec<VaultFile> = survivors.by_ref().take(CHILDREN_DISPLAY_LIMIT).collect();
    let overflowed = survivors.next().is_some();

    ChildListing { shown, overflowed }
}

/// Icon for a child entry. Index files render as folders regardless of extension.
pub fn classify_icon(file: &VaultFile) -> ItemIcon {
    if file.is_folder_index() {
        return ItemIcon::Folder;
    }
    let ext = file.extension();
    EXTENSION_ICONS
        .iter()
        .find(|(_, exts)| exts.contains(&ext))
        .map(|(icon, _)| *icon)
        .unwrap_or(ItemIcon::File)
}
