use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder text substituted for each kind of markup span.
///
/// Plain `<? ... ?>` statement blocks and `<?= ... ?>` value-emitting blocks
/// get separate placeholders: an emit block sits in expression position in
/// the host language, so its placeholder must be a valid expression (`"0"`
/// by default), while a statement block can usually vanish entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Replacement {
    /// Substituted for plain `<? ... ?>` statement blocks
    pub plain: String,
    /// Substituted for `<?= ... ?>` value-emitting blocks
    pub emit: String,
}

impl Default for Replacement {
    fn default() -> Self {
        Self {
            plain: String::new(),
            emit: String::from("0"),
        }
    }
}

/// Options controlling how embedded markup is filtered out of a document
/// before the host analyzer runs.
///
/// All options have defaults, so an empty config file (or none at all) is
/// valid. An empty placeholder string is legal and simply removes the span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkupConfig {
    /// File extensions (with leading dot) treated as embedding documents
    pub extensions: Vec<String>,
    /// Placeholder text per span kind
    pub replacement: Replacement,
    /// Preserve the line terminator after a span instead of folding it into
    /// the replaced region
    pub keep_line_ending: bool,
    /// Strip whitespace adjacent to a span when it would survive only as a
    /// substitution artifact next to the placeholder
    pub collapse_whitespace: bool,
    /// Absorb leading same-line whitespace into a span when doing so leaves
    /// no blank line behind
    pub collapse_blank_line: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            extensions: vec![String::from(".php")],
            replacement: Replacement::default(),
            keep_line_ending: false,
            collapse_whitespace: false,
            collapse_blank_line: false,
        }
    }
}

impl MarkupConfig {
    /// Check whether a file should be treated as an embedding document
    /// based on its extension.
    #[must_use]
    pub fn applies_to(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|configured| configured.strip_prefix('.') == Some(extension))
    }
}
