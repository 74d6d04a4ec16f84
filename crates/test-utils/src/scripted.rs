//! A scripted stand-in for the host analyzer.

use markup_processor::Analyzer;
use markup_types::Diagnostic;
use std::cell::RefCell;

/// An [`Analyzer`] that returns a fixed list of diagnostics and records
/// every buffer it was asked to analyze.
///
/// Tests script the diagnostics in filtered-buffer coordinates and assert
/// on what comes back after remapping.
#[derive(Debug, Default)]
pub struct ScriptedAnalyzer {
    diagnostics: Vec<Diagnostic>,
    analyzed: RefCell<Vec<String>>,
}

impl ScriptedAnalyzer {
    /// Create an analyzer that reports nothing.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Create an analyzer that reports the given diagnostics for any input.
    #[must_use]
    pub fn reporting(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            analyzed: RefCell::new(Vec::new()),
        }
    }

    /// The buffers passed to [`Analyzer::analyze`] so far, in order.
    #[must_use]
    pub fn analyzed(&self) -> Vec<String> {
        self.analyzed.borrow().clone()
    }
}

impl Analyzer for ScriptedAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Diagnostic> {
        self.analyzed.borrow_mut().push(text.to_string());
        self.diagnostics.clone()
    }
}
