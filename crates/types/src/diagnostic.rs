//! Diagnostic and fix types at the analyzer boundary.

use crate::{DiagnosticSeverity, OffsetRange, Position};

/// An autofix attached to a diagnostic.
///
/// `range` is half-open with 0-based byte offsets into the buffer the
/// analyzer was given; `text` replaces the range when the fix is applied.
/// After remapping, the range addresses the original buffer instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// Byte offset range to replace
    pub range: OffsetRange,
    /// The text to replace the range with (empty string means deletion)
    pub text: String,
}

impl Fix {
    /// Create a new fix that replaces a range with new text.
    #[must_use]
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range: OffsetRange::new(start, end),
            text: text.into(),
        }
    }

    /// Create a deletion fix (replace range with empty string).
    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            range: OffsetRange::new(start, end),
            text: String::new(),
        }
    }

    /// Returns `true` if this fix is a deletion (empty replacement text).
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.text.is_empty() && !self.range.is_empty()
    }
}

/// One analyzer message, positioned against a specific buffer.
///
/// Produced by the host analyzer against the filtered buffer it was given;
/// the remapper rewrites line/column (and the fix range, when present) in
/// place so the record addresses the original buffer, after which ownership
/// passes to the caller for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Line the message points at (1-based)
    pub line: u32,
    /// Column the message points at (1-based)
    pub column: u32,
    /// End line, when the analyzer reports a span (1-based)
    pub end_line: Option<u32>,
    /// End column, when the analyzer reports a span (1-based)
    pub end_column: Option<u32>,
    /// Severity as reported by the analyzer
    pub severity: DiagnosticSeverity,
    /// Human-readable message
    pub message: String,
    /// Identifier of the rule that produced the message, if any
    pub rule_id: Option<String>,
    /// Optional auto-fix for this diagnostic
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Create a new diagnostic at a line/column.
    #[must_use]
    pub fn new(
        line: u32,
        column: u32,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
            severity,
            message: message.into(),
            rule_id: None,
            fix: None,
        }
    }

    /// Create an error diagnostic.
    #[must_use]
    pub fn error(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::new(line, column, DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::new(line, column, DiagnosticSeverity::Warning, message)
    }

    /// Attach the identifier of the producing rule.
    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Attach an end position.
    #[must_use]
    pub const fn with_end(mut self, line: u32, column: u32) -> Self {
        self.end_line = Some(line);
        self.end_column = Some(column);
        self
    }

    /// Attach an auto-fix.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// The start position of this diagnostic.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if this diagnostic has an auto-fix available.
    #[must_use]
    pub const fn has_fix(&self) -> bool {
        self.fix.is_some()
    }
}
