use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemapError>;

/// Contract violations while translating analyzer coordinates.
///
/// The analyzer must only report positions against the buffer it was given,
/// so any of these aborts the current document's processing rather than
/// silently clamping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemapError {
    #[error("position {line}:{column} is outside the filtered buffer")]
    PositionOutOfRange { line: u32, column: u32 },

    #[error("offset {offset} is outside the filtered buffer (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("filtered line table has not been attached")]
    MissingFilteredLines,
}
