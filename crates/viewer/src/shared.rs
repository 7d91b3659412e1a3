//! A [`VaultGraph`] shared between the render loop and the removal workflow.

use crate::host::{TagMutator, VaultFolders};
use async_trait::async_trait;
use ftags_graph::{TagOracle, VaultFile, VaultFolder, VaultGraph};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloning shares the graph; every clone sees the other's edits.
#[derive(Debug, Clone, Default)]
pub struct SharedVault {
    graph: Arc<RwLock<VaultGraph>>,
}

impl SharedVault {
    pub fn new(graph: VaultGraph) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, VaultGraph> {
        self.graph.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, VaultGraph> {
        self.graph.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in a freshly loaded graph
    pub fn replace(&self, graph: VaultGraph) {
        *self.write() = graph;
    }

    pub fn snapshot(&self) -> VaultGraph {
        self.read().clone()
    }
}

impl From<VaultGraph> for SharedVault {
    fn from(graph: VaultGraph) -> Self {
        Self::new(graph)
    }
}

impl VaultFolders for SharedVault {
    fn folder_by_path(&self, path: &str) -> Option<VaultFolder> {
        self.read().folder_by_path(path)
    }
}

#[async_trait]
impl TagMutator for SharedVault {
    async fn remove_ftag(
        &self,
        tag: &VaultFile,
        file: &VaultFile,
        inbox: Option<VaultFolder>,
    ) -> anyhow::Result<()> {
        self.write()
            .remove_ftag(&tag.path, &file.path, inbox.as_ref())?;
        Ok(())
    }
}

impl TagOracle for SharedVault {
    fn direct_parents(&self, file: &VaultFile) -> Vec<VaultFile> {
        self.read().direct_parents(file)
    }

    fn direct_children(&self, file: &VaultFile) -> Vec<VaultFile> {
        self.read().direct_children(file)
    }
}
