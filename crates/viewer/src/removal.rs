use crate::error::{Result, ViewerError};
use crate::host::{Confirmation, Notifier, TagMutator, UntagPrompt, VaultFolders};
use ftags_graph::VaultFile;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The user declined; nothing changed
    Cancelled,
    /// The mutation primitive accepted the removal
    Removed,
}

pub fn missing_inbox_notice(inbox: &str) -> String {
    format!(
        "You should create your inbox folder ({inbox}) to be able to delete last ftag \
         (if the last ftag is the inbox you won't be able to delete it too)"
    )
}

/// Detaches a first-layer tag from a file behind a confirmation step.
///
/// The edit itself belongs to the [`TagMutator`]; this only gates it and hands
/// over the inbox folder as the fallback destination.
#[derive(Clone)]
pub struct RemovalWorkflow {
    inbox: String,
    folders: Arc<dyn VaultFolders>,
    notifier: Arc<dyn Notifier>,
    confirmation: Arc<dyn Confirmation>,
    mutator: Arc<dyn TagMutator>,
}

impl RemovalWorkflow {
    pub fn new(
        inbox: impl Into<String>,
        folders: Arc<dyn VaultFolders>,
        notifier: Arc<dyn Notifier>,
        confirmation: Arc<dyn Confirmation>,
        mutator: Arc<dyn TagMutator>,
    ) -> Self {
        Self {
            inbox: inbox.into(),
            folders,
            notifier,
            confirmation,
            mutator,
        }
    }

    pub async fn request(&self, tag: &VaultFile, file: &VaultFile) -> Result<RemovalOutcome> {
        if self.folders.folder_by_path(&self.inbox).is_none() {
            self.notifier.notice(&missing_inbox_notice(&self.inbox));
        }

        let prompt = UntagPrompt::for_tag(tag);
        if !self.confirmation.confirm(&prompt).await {
            log::debug!("untag {} from {} cancelled", tag.path, file.path);
            return Ok(RemovalOutcome::Cancelled);
        }

        // Resolved again: the folder may have been created while the prompt was open.
        let inbox = self.folders.folder_by_path(&self.inbox);
        self.mutator
            .remove_ftag(tag, file, inbox)
            .await
            .map_err(|err| ViewerError::Mutation(format!("{err:#}")))?;

        log::info!("untagged {} from {}", tag.path, file.path);
        Ok(RemovalOutcome::Removed)
    }
}
