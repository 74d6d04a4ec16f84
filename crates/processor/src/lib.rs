//! Adapter pipeline around a host-language analyzer.
//!
//! The host tool registers [`process_document`] as its hook for files that
//! may contain embedded PHP markup. Per document the pipeline is:
//!
//! 1. filter the original text, capturing an [`AnalysisContext`]
//! 2. run the analyzer on the filtered buffer
//! 3. attach the filtered buffer's line table to the context
//! 4. remap every diagnostic back to original coordinates
//! 5. sort by `(line, column)`
//!
//! Each call owns a fresh context; nothing is shared across documents, so
//! independent workers may process documents concurrently.

mod analyzer;
mod error;

pub use analyzer::Analyzer;
pub use error::{ProcessError, Result};

use std::path::Path;

use markup_config::MarkupConfig;
use markup_remap::AnalysisContext;
use markup_types::{Diagnostic, LineIndex};

/// Process one document that is known to embed markup.
///
/// Filters `text`, analyzes the filtered buffer, and returns diagnostics
/// positioned against the original `text`, sorted ascending by
/// `(line, column)`. A document without markup degenerates to a plain
/// analyzer call plus the sort.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn process_text<A: Analyzer>(
    text: &str,
    config: &MarkupConfig,
    analyzer: &A,
) -> Result<Vec<Diagnostic>> {
    let (mut context, filtered) = AnalysisContext::prepare(text, config);
    tracing::debug!(
        regions = context.regions().len(),
        filtered_len = filtered.len(),
        "analyzing filtered buffer"
    );

    let mut diagnostics = analyzer.analyze(&filtered);
    context.attach_filtered_lines(LineIndex::new(&filtered));
    context.remap_diagnostics(&mut diagnostics)?;

    diagnostics.sort_by(|a, b| (a.line, a.column).cmp(&(b.line, b.column)));
    Ok(diagnostics)
}

/// Process one document, filtering only when its extension is configured.
///
/// Files whose extension is not in the configured set are handed to the
/// analyzer verbatim and their diagnostics returned untouched.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn process_document<A: Analyzer>(
    text: &str,
    path: &Path,
    config: &MarkupConfig,
    analyzer: &A,
) -> Result<Vec<Diagnostic>> {
    if config.applies_to(path) {
        process_text(text, config, analyzer)
    } else {
        tracing::trace!("extension not configured, analyzing verbatim");
        Ok(analyzer.analyze(text))
    }
}
