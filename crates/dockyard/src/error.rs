//! Error types for docking operations.

use thiserror::Error;

use crate::id::{FloatId, GroupId, PanelId, TabId};

/// Errors reported by the docking engine.
///
/// None of these are fatal: the layout is left untouched whenever an
/// operation returns an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DockError {
    #[error("panel `{0}` not found")]
    PanelNotFound(PanelId),
    #[error("tab `{0}` not found")]
    TabNotFound(TabId),
    #[error("group `{0}` not found")]
    GroupNotFound(GroupId),
    #[error("floating window `{0}` not found")]
    FloatNotFound(FloatId),
    /// The target resolved to a node that cannot receive this operation.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    /// A drag is already armed or running.
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("no drag is active")]
    NoActiveDrag,
    #[error("no resize is active")]
    NoActiveResize,
    /// Plain-data layout failed structural validation.
    #[error("invalid layout: {}", .0.join("; "))]
    InvalidLayout(Vec<String>),
    #[error("failed to parse layout: {0}")]
    Parse(String),
}

impl DockError {
    /// Whether this error means an id did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DockError::PanelNotFound(_)
                | DockError::TabNotFound(_)
                | DockError::GroupNotFound(_)
                | DockError::FloatNotFound(_)
        )
    }
}

impl From<serde_json::Error> for DockError {
    fn from(err: serde_json::Error) -> Self {
        DockError::Parse(err.to_string())
    }
}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;
