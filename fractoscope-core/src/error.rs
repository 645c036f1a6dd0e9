use thiserror::Error;

/// Errors originating from the viewport model and the interaction core.
///
/// All of these are precondition violations: the operation that raised one
/// is aborted and leaves the state it was called on untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid zoom factor: {0} (must be > 0.0 and finite)")]
    InvalidZoomFactor(f64),

    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
