use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessError>;

/// Failures while processing a single document.
///
/// A failure is local to the document that produced it; callers processing
/// many documents report it and move on to the next one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("failed to remap analyzer output: {0}")]
    Remap(#[from] markup_remap::RemapError),
}
