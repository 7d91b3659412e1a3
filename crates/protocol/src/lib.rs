//! Render instructions shared between the tag-graph engine and the host viewer.
//!
//! Nothing in here touches a UI toolkit: a host receives a [`Fragment`] and
//! projects it into its own header region.

use serde::{Deserialize, Serialize};

pub mod path_filters;

pub use path_filters::{IgnoreRule, IgnoreRules};

/// Host plugin that provides the "add tag" command.
pub const ADD_FTAG_PLUGIN: &str = "crosslink-advanced";
pub const ADD_FTAG_COMMAND: &str = "crosslink-advanced:add-ftag";
pub const REVEAL_ACTIVE_FILE_COMMAND: &str = "file-explorer:reveal-active-file";

/// Maximum number of children listed before the "more" item takes over.
pub const CHILDREN_DISPLAY_LIMIT: usize = 5;

/// Breadth-first distance of an ancestor from the origin file.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    First,
    Second,
    Third,
    Fourth,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::First, Layer::Second, Layer::Third, Layer::Fourth];

    pub const fn as_str(self) -> &'static str {
        match self {
            Layer::First => "first",
            Layer::Second => "second",
            Layer::Third => "third",
            Layer::Fourth => "fourth",
        }
    }

    pub fn css_class(self) -> String {
        format!("viewer-ftag-tag-chip-layer-{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemIcon {
    Folder,
    Image,
    File,
}

impl ItemIcon {
    pub const fn icon_name(self) -> &'static str {
        match self {
            ItemIcon::Folder => "folder",
            ItemIcon::Image => "image",
            ItemIcon::File => "file",
        }
    }
}

/// One ancestor tag rendered as `#basename`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Chip {
    pub path: String,
    pub label: String,
    pub layer: Layer,
    /// Only first-layer chips can be detached from the file.
    pub removable: bool,
    pub tooltip: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChipStrip {
    pub add_tag_button: bool,
    pub chips: Vec<Chip>,
}

impl ChipStrip {
    pub fn chips_in(&self, layer: Layer) -> impl Iterator<Item = &Chip> {
        self.chips.iter().filter(move |chip| chip.layer == layer)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub path: String,
    pub label: String,
    pub icon: ItemIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl TreeItem {
    /// The overflow marker; activating it reveals the active file instead of
    /// listing more children.
    pub fn more() -> Self {
        Self {
            path: "/".to_string(),
            label: "...".to_string(),
            icon: ItemIcon::Folder,
            tooltip: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChildStrip {
    pub items: Vec<TreeItem>,
    pub more: Option<TreeItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    Ancestors,
    Descendants,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 2] = [FragmentKind::Ancestors, FragmentKind::Descendants];

    /// Class of the outer container the host attaches the fragment to.
    pub const fn container_class(self) -> &'static str {
        match self {
            FragmentKind::Ancestors => "static-tag-chips-container-outer",
            FragmentKind::Descendants => "ftags-children-outer",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Ancestors(ChipStrip),
    Descendants(ChildStrip),
}

impl Fragment {
    pub const fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Ancestors(_) => FragmentKind::Ancestors,
            Fragment::Descendants(_) => FragmentKind::Descendants,
        }
    }
}

/// Where a file gets opened.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpenTarget {
    Current,
    Tab,
    Split,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuSection {
    Open,
    Action,
    Danger,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Open(OpenTarget),
    Rename,
    Delete,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub section: MenuSection,
    pub title: String,
    pub icon: String,
    pub warning: bool,
    pub action: MenuAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_classes_follow_layer_names() {
        let classes: Vec<String> = Layer::ALL.iter().map(|l| l.css_class()).collect();
        assert_eq!(classes[0], "viewer-ftag-tag-chip-layer-first");
        assert_eq!(classes[3], "viewer-ftag-tag-chip-layer-fourth");
    }

    #[test]
    fn fragments_serialize_with_kind_tag() {
        let fragment = Fragment::Descendants(ChildStrip {
            items: Vec::new(),
            more: Some(TreeItem::more()),
        });
        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["kind"], "descendants");
        assert_eq!(value["more"]["label"], "...");
        assert_eq!(fragment.kind(), FragmentKind::Descendants);
    }
}
