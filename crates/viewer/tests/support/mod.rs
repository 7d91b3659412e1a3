#![allow(dead_code)]

use async_trait::async_trait;
use ftags_graph::{VaultFile, VaultGraph};
use ftags_protocol::{ChildStrip, ChipStrip, Fragment, FragmentKind, OpenTarget};
use ftags_viewer::{Navigator, ViewKind, ViewPane, Workspace};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct FakeView {
    pub kind: ViewKind,
    pub file: Option<VaultFile>,
    pub header: bool,
    pub fragments: Vec<Fragment>,
}

impl FakeView {
    pub fn markdown(path: &str) -> Self {
        Self {
            kind: ViewKind::Markdown,
            file: Some(VaultFile::new(path)),
            header: true,
            fragments: Vec::new(),
        }
    }

    pub fn of_kind(kind: ViewKind, path: &str) -> Self {
        Self {
            kind,
            ..Self::markdown(path)
        }
    }

    pub fn chips(&self) -> Option<&ChipStrip> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Ancestors(strip) => Some(strip),
            Fragment::Descendants(_) => None,
        })
    }

    pub fn children(&self) -> Option<&ChildStrip> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Descendants(strip) => Some(strip),
            Fragment::Ancestors(_) => None,
        })
    }

    pub fn chip_labels(&self) -> Vec<String> {
        self.chips()
            .map(|strip| strip.chips.iter().map(|c| c.label.clone()).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, kind: FragmentKind) -> usize {
        self.fragments.iter().filter(|f| f.kind() == kind).count()
    }
}

impl ViewPane for FakeView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn file(&self) -> Option<VaultFile> {
        self.file.clone()
    }

    fn has_header(&self) -> bool {
        self.header
    }

    fn mount(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    fn unmount(&mut self, kind: FragmentKind) {
        self.fragments.retain(|f| f.kind() != kind);
    }
}

/// Workspace whose views stay observable after being moved into a task
#[derive(Clone, Default)]
pub struct FakeWorkspace {
    pub views: Arc<Mutex<Vec<FakeView>>>,
    pub active: Option<usize>,
    pub ignore_filters: Vec<String>,
    pub plugins: Vec<String>,
    pub desktop: bool,
}

impl FakeWorkspace {
    pub fn with_views(views: Vec<FakeView>) -> Self {
        Self {
            views: Arc::new(Mutex::new(views)),
            active: Some(0),
            desktop: true,
            ..Self::default()
        }
    }

    pub fn view(&self, idx: usize) -> FakeView {
        self.views.lock().unwrap()[idx].clone()
    }
}

impl Workspace for FakeWorkspace {
    fn active_file(&self) -> Option<VaultFile> {
        let idx = self.active?;
        self.views.lock().unwrap().get(idx)?.file.clone()
    }

    fn iterate_views(&mut self, visit: &mut dyn FnMut(&mut dyn ViewPane)) {
        let mut views = self.views.lock().unwrap();
        for view in views.iter_mut() {
            visit(view);
        }
    }

    fn user_ignore_filters(&self) -> Vec<String> {
        self.ignore_filters.clone()
    }

    fn plugin_enabled(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|p| p == plugin_id)
    }

    fn is_desktop(&self) -> bool {
        self.desktop
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub opened: Mutex<Vec<(String, OpenTarget)>>,
    pub commands: Mutex<Vec<String>>,
    pub hovers: Mutex<Vec<(String, String)>>,
    pub renames: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn open_file(&self, file: VaultFile, target: OpenTarget) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push((file.path, target));
        Ok(())
    }

    fn execute_command(&self, command_id: &str) {
        self.commands.lock().unwrap().push(command_id.to_string());
    }

    fn hover_link(&self, source: &VaultFile, link_text: &str) {
        self.hovers
            .lock()
            .unwrap()
            .push((source.path.clone(), link_text.to_string()));
    }

    fn prompt_rename(&self, file: &VaultFile) {
        self.renames.lock().unwrap().push(file.path.clone());
    }

    fn prompt_delete(&self, file: &VaultFile) {
        self.deletes.lock().unwrap().push(file.path.clone());
    }
}

/// notes/borrowck.md is tagged rust and lang; rust sits in the code folder.
pub fn sample_vault() -> VaultGraph {
    let mut graph = VaultGraph::new();
    for path in [
        "code/code.md",
        "code/rust/rust.md",
        "topics/lang.md",
        "notes/borrowck.md",
        "notes/lifetimes.md",
    ] {
        graph.add_file(VaultFile::new(path));
    }
    graph.add_tag("notes/borrowck.md", "code/rust/rust.md").unwrap();
    graph.add_tag("notes/borrowck.md", "topics/lang.md").unwrap();
    graph.add_tag("notes/lifetimes.md", "code/rust/rust.md").unwrap();
    graph
}
