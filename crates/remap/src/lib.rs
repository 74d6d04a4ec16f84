//! Coordinate remapping from the filtered buffer back to the original.
//!
//! The extractor shrinks (or grows) a document by replacing markup spans
//! with placeholders; the host analyzer then reports line/column positions
//! and fix ranges against that filtered buffer. [`AnalysisContext`] holds
//! the per-document state needed to invert every substitution and rewrite
//! the analyzer's output into coordinates of the unmodified document.
//!
//! One context exists per document under analysis. Contexts are plain
//! values owned by the caller; documents processed on separate threads
//! never share state.

mod context;
mod error;

pub use context::AnalysisContext;
pub use error::{RemapError, Result};
