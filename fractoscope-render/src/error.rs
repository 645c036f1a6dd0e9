use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

impl From<fractoscope_core::CoreError> for RenderError {
    fn from(e: fractoscope_core::CoreError) -> Self {
        Self::InvalidParameters {
            reason: e.to_string(),
        }
    }
}
