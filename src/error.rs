//! Error types for the animator.

use thiserror::Error;

/// Errors raised by [`StreamingAnimator`](crate::StreamingAnimator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimatorError {
    /// The configured target could not be resolved in the document.
    #[error("target surface '{target}' not found")]
    TargetNotFound {
        /// The identifier that failed to resolve.
        target: String,
    },

    /// The animator was destroyed and no longer accepts chunks.
    #[error("animator has been destroyed")]
    Destroyed,
}
