//! The consumed analyzer boundary.

use markup_types::Diagnostic;

/// A host-language analyzer.
///
/// Implementations receive a text buffer and report diagnostics positioned
/// against that exact buffer: 1-based line/column, optional end position,
/// and fix ranges as 0-based byte offsets into it. The processor owns the
/// translation of those positions when the buffer was filtered.
pub trait Analyzer {
    /// Analyze `text` and return its diagnostics.
    fn analyze(&self, text: &str) -> Vec<Diagnostic>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Vec<Diagnostic>,
{
    fn analyze(&self, text: &str) -> Vec<Diagnostic> {
        self(text)
    }
}
