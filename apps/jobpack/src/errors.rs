use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline-level error type.
///
/// Everything here is fatal for the run. Template anchors that cannot be found
/// are not errors: populators report them by returning `Ok(None)`.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{kind} file not found at {}", path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    #[error("Failed to read document '{}': {message}", path.display())]
    DocumentRead { path: PathBuf, message: String },

    #[error("Failed to write document '{}': {message}", path.display())]
    DocumentWrite { path: PathBuf, message: String },

    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
