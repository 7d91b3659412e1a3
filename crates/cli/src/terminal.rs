use anyhow::Result;
use ftags_graph::VaultFile;
use ftags_protocol::{ChildStrip, ChipStrip, Fragment, FragmentKind, Layer, ADD_FTAG_PLUGIN};
use ftags_viewer::{ViewKind, ViewPane, Workspace};
use itertools::Itertools;
use serde::Serialize;

/// A file "open" in the terminal; fragments are printed instead of mounted.
pub struct TerminalView {
    file: VaultFile,
    fragments: Vec<Fragment>,
}

impl TerminalView {
    pub fn open(file: VaultFile) -> Self {
        Self {
            file,
            fragments: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("== {} ==\n", self.file.path);
        if self.fragments.is_empty() {
            out.push_str("(no tags)\n");
        }
        for fragment in &self.fragments {
            match fragment {
                Fragment::Ancestors(strip) => out.push_str(&render_chips(strip)),
                Fragment::Descendants(strip) => {
                    out.push_str("children:\n");
                    out.push_str(&render_children(strip));
                }
            }
        }
        out
    }
}

impl ViewPane for TerminalView {
    fn kind(&self) -> ViewKind {
        ViewKind::Markdown
    }

    fn file(&self) -> Option<VaultFile> {
        Some(self.file.clone())
    }

    fn has_header(&self) -> bool {
        true
    }

    fn mount(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    fn unmount(&mut self, kind: FragmentKind) {
        self.fragments.retain(|f| f.kind() != kind);
    }
}

#[derive(Serialize)]
struct ViewSnapshot<'a> {
    file: &'a str,
    fragments: &'a [Fragment],
}

/// The first view is treated as the active one.
pub struct TerminalWorkspace {
    views: Vec<TerminalView>,
    ignore_filters: Vec<String>,
    add_tag_plugin: bool,
}

impl TerminalWorkspace {
    pub fn new(views: Vec<TerminalView>, ignore_filters: Vec<String>, add_tag_plugin: bool) -> Self {
        Self {
            views,
            ignore_filters,
            add_tag_plugin,
        }
    }

    pub fn set_ignore_filters(&mut self, filters: Vec<String>) {
        self.ignore_filters = filters;
    }

    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            let snapshots: Vec<_> = self
                .views
                .iter()
                .map(|view| ViewSnapshot {
                    file: &view.file.path,
                    fragments: &view.fragments,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        } else {
            print!("{}", self.views.iter().map(TerminalView::render).join("\n"));
        }
        Ok(())
    }
}

impl Workspace for TerminalWorkspace {
    fn active_file(&self) -> Option<VaultFile> {
        self.views.first().map(|view| view.file.clone())
    }

    fn iterate_views(&mut self, visit: &mut dyn FnMut(&mut dyn ViewPane)) {
        for view in &mut self.views {
            visit(view);
        }
    }

    fn user_ignore_filters(&self) -> Vec<String> {
        self.ignore_filters.clone()
    }

    fn plugin_enabled(&self, plugin_id: &str) -> bool {
        self.add_tag_plugin && plugin_id == ADD_FTAG_PLUGIN
    }
}

/// One line per non-empty layer, removable chips marked with `x`.
pub fn render_chips(strip: &ChipStrip) -> String {
    let mut out = String::new();
    for layer in Layer::ALL {
        let line = strip
            .chips_in(layer)
            .map(|chip| {
                if chip.removable {
                    format!("{} [x]", chip.label)
                } else {
                    chip.label.clone()
                }
            })
            .join("  ");
        if !line.is_empty() {
            out.push_str(&format!("{}: {line}\n", layer.as_str()));
        }
    }
    if strip.add_tag_button {
        out.push_str("+ Add tag...\n");
    }
    out
}

pub fn render_children(strip: &ChildStrip) -> String {
    strip
        .items
        .iter()
        .chain(strip.more.as_ref())
        .map(|item| format!("  [{}] {}\n", item.icon.icon_name(), item.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftags_protocol::{Chip, ItemIcon, TreeItem};
    use pretty_assertions::assert_eq;

    fn chip(label: &str, layer: Layer) -> Chip {
        Chip {
            path: format!("{label}.md"),
            label: format!("#{label}"),
            layer,
            removable: layer == Layer::First,
            tooltip: String::new(),
        }
    }

    #[test]
    fn chips_are_grouped_by_layer() {
        let strip = ChipStrip {
            add_tag_button: true,
            chips: vec![
                chip("rust", Layer::First),
                chip("lang", Layer::First),
                chip("code", Layer::Third),
            ],
        };
        assert_eq!(
            render_chips(&strip),
            "first: #rust [x]  #lang [x]\nthird: #code\n+ Add tag...\n"
        );
    }

    #[test]
    fn overflow_marker_closes_the_list() {
        let strip = ChildStrip {
            items: vec![TreeItem {
                path: "a/a.md".to_string(),
                label: "a".to_string(),
                icon: ItemIcon::Folder,
                tooltip: None,
            }],
            more: Some(TreeItem::more()),
        };
        assert_eq!(render_children(&strip), "  [folder] a\n  [folder] ...\n");
    }

    #[test]
    fn first_view_is_active() {
        let workspace = TerminalWorkspace::new(
            vec![
                TerminalView::open(VaultFile::new("a.md")),
                TerminalView::open(VaultFile::new("b.md")),
            ],
            Vec::new(),
            false,
        );
        assert_eq!(workspace.active_file().map(|f| f.path), Some("a.md".to_string()));
        assert!(!workspace.plugin_enabled(ADD_FTAG_PLUGIN));
    }
}
