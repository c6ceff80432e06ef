//! Runtime errors

use fsmgen_artifact::{Identifier, IdentifierError};

/// Errors raised by [`StateMachine`](crate::StateMachine) and
/// [`FrameLoop`](crate::FrameLoop)
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Name is blank after whitespace removal
    #[error("invalid state name: {0}")]
    InvalidName(#[from] IdentifierError),

    /// A state with this name is already registered
    #[error("state already registered: {0}")]
    DuplicateState(Identifier),

    /// No state registered under this name
    #[error("unknown state: '{0}'")]
    UnknownState(String),

    /// The frame loop task panicked or was aborted
    #[error("frame loop task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
