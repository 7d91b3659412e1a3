use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Graph error: {0}")]
    GraphError(#[from] ftags_graph::GraphError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Tag removal failed: {0}")]
    Mutation(String),

    #[error("Refresh service stopped: {0}")]
    ServiceClosed(String),
}
