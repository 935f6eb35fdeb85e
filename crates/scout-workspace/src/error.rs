//! Error types for the workspace engine

use crate::window::WindowId;

/// Errors surfaced by [`ScoutWorkspace`](crate::ScoutWorkspace) operations
#[derive(thiserror::Error, Debug)]
pub enum WorkspaceError {
    #[error("select at least one team before opening a graph")]
    NoTeamsSelected,

    #[error("category '{category}' is already open in window {id}")]
    CategoryAlreadyOpen { category: String, id: WindowId },

    #[error("stale render result for window {0}")]
    StaleRender(WindowId),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
