//! Chain error definitions.

use thiserror::Error;

use crate::chain::handler::StageId;

/// Reasons a chain invocation halts.
///
/// A stage reports one of these to stop the chain; the chain returns it to
/// the caller of `process` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The raw credential did not match the expected value.
    #[error("authentication failed: credential rejected")]
    AuthenticationFailed,

    /// The authorization token was missing or not accepted.
    #[error("authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    /// Generic failure raised by any other stage.
    #[error("stage '{stage}' failed: {reason}")]
    StageFailed { stage: String, reason: String },

    /// A cancellation flag was observed before the chain completed.
    #[error("request cancelled at stage '{stage}'")]
    Cancelled { stage: String },

    /// The chain has no entry stage to start from.
    #[error("chain has no entry stage")]
    NoEntryStage,

    /// Invocation referenced a stage this chain does not know.
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl ChainError {
    /// Build a [`ChainError::StageFailed`].
    pub fn stage_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ChainError::AuthenticationFailed => "authentication_failed",
            ChainError::AuthorizationDenied { .. } => "authorization_denied",
            ChainError::StageFailed { .. } => "stage_failed",
            ChainError::Cancelled { .. } => "cancelled",
            ChainError::NoEntryStage => "no_entry_stage",
            ChainError::Link(_) => "link",
        }
    }
}

/// Errors raised while rewriting chain links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The id does not belong to this chain.
    #[error("unknown stage {0}")]
    UnknownStage(StageId),

    /// Linking `from -> to` would let traversal loop back to `from`.
    #[error("linking {from} -> {to} would create a cycle")]
    Cycle { from: StageId, to: StageId },

    /// The stage is registered but not on the traversal from the entry.
    #[error("stage {0} is not reachable from the entry stage")]
    Unreachable(StageId),
}
