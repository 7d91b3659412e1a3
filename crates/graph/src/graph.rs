use crate::error::{GraphError, Result};
use crate::types::{parent_dir, TagOracle, VaultFile, VaultFolder, ROOT_PATH};
use itertools::Itertools;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// Explicit "tagged with" edge (file -> tag)
#[derive(Debug, Clone, Copy)]
pub struct TagEdge {
    /// Insertion order; parents are reported in the order they were added
    seq: u64,
}

/// In-memory vault with ftag semantics.
///
/// A file's parents are the index file of the folder it lives in (for an
/// index file, the folder above) followed by its explicit tags.
#[derive(Debug, Clone)]
pub struct VaultGraph {
    graph: StableDiGraph<VaultFile, TagEdge>,

    /// Path -> NodeIndex mapping for fast lookup
    path_index: HashMap<String, NodeIndex>,

    /// Folder path -> its index file; the first one added wins
    index_files: HashMap<String, NodeIndex>,

    /// Folders declared without any file in them
    folders: BTreeSet<String>,

    next_seq: u64,
}

impl VaultGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            path_index: HashMap::new(),
            index_files: HashMap::new(),
            folders: BTreeSet::new(),
            next_seq: 0,
        }
    }

    /// Add a file, or refresh the stat of an existing one
    pub fn add_file(&mut self, file: VaultFile) -> NodeIndex {
        if let Some(&idx) = self.path_index.get(&file.path) {
            self.graph[idx] = file;
            return idx;
        }
        let path = file.path.clone();
        let idx = self.graph.add_node(file);
        self.path_index.insert(path, idx);
        self.index_folder_of(idx);
        idx
    }

    pub fn add_folder(&mut self, path: impl Into<String>) {
        self.folders.insert(path.into());
    }

    /// Tag `file_path` with the tag file at `tag_path`
    pub fn add_tag(&mut self, file_path: &str, tag_path: &str) -> Result<()> {
        let from = self.require(file_path)?;
        let to = self.require(tag_path)?;
        if self.graph.find_edge(from, to).is_some() {
            return Ok(());
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(from, to, TagEdge { seq });
        Ok(())
    }

    pub fn file(&self, path: &str) -> Option<&VaultFile> {
        self.path_index.get(path).map(|&idx| &self.graph[idx])
    }

    pub fn files(&self) -> impl Iterator<Item = &VaultFile> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn file_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn tag_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Explicit tags of `path` in insertion order; folder-implied tags are not included
    pub fn tags_of(&self, path: &str) -> Vec<&VaultFile> {
        self.path_index
            .get(path)
            .map(|&idx| {
                self.explicit_tags(idx, Direction::Outgoing)
                    .into_iter()
                    .map(|tag| &self.graph[tag])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Folders declared through [`VaultGraph::add_folder`]
    pub fn declared_folders(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(String::as_str)
    }

    /// A folder exists when declared or when any file lives below it
    pub fn folder_by_path(&self, path: &str) -> Option<VaultFolder> {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return None;
        }
        let declared = self.folders.contains(path);
        let prefix = format!("{path}/");
        if declared || self.path_index.keys().any(|p| p.starts_with(&prefix)) {
            Some(VaultFolder::new(path))
        } else {
            None
        }
    }

    pub fn rename_file(&mut self, from: &str, to: &str) -> Result<()> {
        if self.path_index.contains_key(to) {
            return Err(GraphError::PathExists(to.to_string()));
        }
        let idx = self
            .path_index
            .remove(from)
            .ok_or_else(|| GraphError::NodeNotFound(from.to_string()))?;
        self.unindex_folder_of(idx);
        self.graph[idx].path = to.to_string();
        self.path_index.insert(to.to_string(), idx);
        self.index_folder_of(idx);
        log::debug!("renamed {from} -> {to}");
        Ok(())
    }

    pub fn delete_file(&mut self, path: &str) -> Result<VaultFile> {
        let idx = self
            .path_index
            .remove(path)
            .ok_or_else(|| GraphError::NodeNotFound(path.to_string()))?;
        self.unindex_folder_of(idx);
        self.graph
            .remove_node(idx)
            .ok_or_else(|| GraphError::NodeNotFound(path.to_string()))
    }

    /// Detach `tag_path` from `file_path`.
    ///
    /// An explicit tag is dropped. A tag implied by the file's folder, or the
    /// last remaining tag, moves the file into `inbox`; without an inbox the
    /// graph is left untouched and an error returned.
    pub fn remove_ftag(
        &mut self,
        tag_path: &str,
        file_path: &str,
        inbox: Option<&VaultFolder>,
    ) -> Result<()> {
        let file_idx = self.require(file_path)?;
        let tag_idx = self.require(tag_path)?;
        let file = self.graph[file_idx].clone();

        let implied = self.folder_parent(&file) == Some(tag_idx);
        let explicit = self.graph.find_edge(file_idx, tag_idx);
        if !implied && explicit.is_none() {
            return Err(GraphError::NotTagged {
                tag: tag_path.to_string(),
                file: file_path.to_string(),
            });
        }

        let remaining = self.direct_parents(&file).len() - 1;
        let must_move = implied || remaining == 0;
        if must_move {
            let Some(inbox) = inbox else {
                return Err(GraphError::NoFallbackFolder(file_path.to_string()));
            };
            if file.parent_path() == inbox.path {
                return Err(GraphError::InboxTag(file_path.to_string()));
            }
            let target = format!("{}/{}", inbox.path, file.name());
            if self.path_index.contains_key(&target) {
                return Err(GraphError::PathExists(target));
            }
            if let Some(edge) = explicit {
                self.graph.remove_edge(edge);
            }
            self.rename_file(file_path, &target)?;
        } else if let Some(edge) = explicit {
            self.graph.remove_edge(edge);
        }

        log::info!("removed tag {tag_path} from {file_path}");
        Ok(())
    }

    fn require(&self, path: &str) -> Result<NodeIndex> {
        self.path_index
            .get(path)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(path.to_string()))
    }

    /// Index file of the folder `file` belongs to
    fn folder_parent(&self, file: &VaultFile) -> Option<NodeIndex> {
        let mut dir = file.parent_path();
        if file.is_folder_index() {
            dir = parent_dir(dir);
        }
        if dir == ROOT_PATH {
            return None;
        }
        self.folder_index(dir)
            .filter(|&idx| self.graph[idx].path != file.path)
    }

    fn folder_index(&self, dir: &str) -> Option<NodeIndex> {
        self.index_files.get(dir).copied()
    }

    fn index_folder_of(&mut self, idx: NodeIndex) {
        let file = &self.graph[idx];
        if file.is_folder_index() {
            self.index_files
                .entry(file.parent_path().to_string())
                .or_insert(idx);
        }
    }

    /// Drop `idx` as its folder's index, promoting another index file of the
    /// same folder if one exists. Must run while `idx` still has its old path.
    fn unindex_folder_of(&mut self, idx: NodeIndex) {
        let dir = self.graph[idx].parent_path().to_string();
        if self.index_files.get(&dir) != Some(&idx) {
            return;
        }
        self.index_files.remove(&dir);
        let replacement = self.graph.node_indices().find(|&other| {
            let candidate = &self.graph[other];
            other != idx && candidate.is_folder_index() && candidate.parent_path() == dir
        });
        if let Some(other) = replacement {
            self.index_files.insert(dir, other);
        }
    }

    fn explicit_tags(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(idx, direction)
            .sorted_by_key(|edge| edge.weight().seq)
            .map(|edge| match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            })
            .collect()
    }
}

impl Default for VaultGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TagOracle for VaultGraph {
    fn direct_parents(&self, file: &VaultFile) -> Vec<VaultFile> {
        let Some(&idx) = self.path_index.get(&file.path) else {
            return Vec::new();
        };
        let current = &self.graph[idx];
        self.folder_parent(current)
            .into_iter()
            .chain(self.explicit_tags(idx, Direction::Outgoing))
            .unique()
            .map(|parent| self.graph[parent].clone())
            .collect()
    }

    fn direct_children(&self, file: &VaultFile) -> Vec<VaultFile> {
        let Some(&idx) = self.path_index.get(&file.path) else {
            return Vec::new();
        };
        let members = self
            .graph
            .node_indices()
            .filter(|&other| other != idx && self.folder_parent(&self.graph[other]) == Some(idx));
        members
            .chain(self.explicit_tags(idx, Direction::Incoming))
            .unique()
            .map(|child| self.graph[child].clone())
            .collect()
    }
}
