//! Seams to the host document viewer.

use async_trait::async_trait;
use ftags_graph::{VaultFile, VaultFolder, VaultGraph};
use ftags_protocol::{Fragment, FragmentKind, OpenTarget};
use serde::{Deserialize, Serialize};

/// Kind of an open view, by the host's view type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Markdown,
    Audio,
    Pdf,
    Image,
    Canvas,
    DirView,
    Other,
}

impl ViewKind {
    pub fn from_view_type(view_type: &str) -> Self {
        match view_type {
            "markdown" => ViewKind::Markdown,
            "audio" => ViewKind::Audio,
            "pdf" => ViewKind::Pdf,
            "image" => ViewKind::Image,
            "canvas" => ViewKind::Canvas,
            "dirview" => ViewKind::DirView,
            _ => ViewKind::Other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ViewKind::Markdown => "markdown",
            ViewKind::Audio => "audio",
            ViewKind::Pdf => "pdf",
            ViewKind::Image => "image",
            ViewKind::Canvas => "canvas",
            ViewKind::DirView => "dirview",
            ViewKind::Other => "other",
        }
    }

    /// Views that get chips at all
    pub const fn is_file_view(self) -> bool {
        !matches!(self, ViewKind::Other)
    }
}

/// One open view (a leaf of the host workspace).
pub trait ViewPane {
    fn kind(&self) -> ViewKind;

    /// File bound to the view, if any
    fn file(&self) -> Option<VaultFile>;

    /// Whether the view has a header region fragments can attach to
    fn has_header(&self) -> bool;

    /// Attach a fragment. The host places descendants after ancestors.
    fn mount(&mut self, fragment: Fragment);

    /// Detach a previously mounted fragment; a no-op when there is none.
    fn unmount(&mut self, kind: FragmentKind);
}

pub trait Workspace {
    fn active_file(&self) -> Option<VaultFile>;

    fn iterate_views(&mut self, visit: &mut dyn FnMut(&mut dyn ViewPane));

    /// Raw ignore filters from the host's vault configuration
    fn user_ignore_filters(&self) -> Vec<String>;

    fn plugin_enabled(&self, _plugin_id: &str) -> bool {
        false
    }

    fn is_desktop(&self) -> bool {
        true
    }
}

pub trait VaultFolders: Send + Sync {
    fn folder_by_path(&self, path: &str) -> Option<VaultFolder>;
}

impl VaultFolders for VaultGraph {
    fn folder_by_path(&self, path: &str) -> Option<VaultFolder> {
        VaultGraph::folder_by_path(self, path)
    }
}

pub trait Notifier: Send + Sync {
    fn notice(&self, message: &str);
}

/// Text of the confirmation asked before untagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntagPrompt {
    pub title: String,
    pub message: String,
}

impl UntagPrompt {
    pub fn for_tag(tag: &VaultFile) -> Self {
        Self {
            title: "Do you want to untag?".to_string(),
            message: format!(
                "Are you sure you want to remove this tag: {}",
                tag.basename()
            ),
        }
    }
}

#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Resolves to true only on explicit confirmation
    async fn confirm(&self, prompt: &UntagPrompt) -> bool;
}

/// Graph edit primitive owned by the host's tag index.
#[async_trait]
pub trait TagMutator: Send + Sync {
    async fn remove_ftag(
        &self,
        tag: &VaultFile,
        file: &VaultFile,
        inbox: Option<VaultFolder>,
    ) -> anyhow::Result<()>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn open_file(&self, file: VaultFile, target: OpenTarget) -> anyhow::Result<()>;

    fn execute_command(&self, command_id: &str);

    /// Ask the host for a hover preview of `link_text`
    fn hover_link(&self, _source: &VaultFile, _link_text: &str) {}

    fn prompt_rename(&self, file: &VaultFile);

    fn prompt_delete(&self, file: &VaultFile);
}
