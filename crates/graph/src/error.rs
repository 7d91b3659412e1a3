use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("File not found: {0}")]
    NodeNotFound(String),

    #[error("Path already exists: {0}")]
    PathExists(String),

    #[error("{file} is not tagged with {tag}")]
    NotTagged { tag: String, file: String },

    #[error("No inbox folder to move {0} into after removing its last tag")]
    NoFallbackFolder(String),

    #[error("Cannot remove the inbox tag from {0}")]
    InboxTag(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
