//! Snapshot testing assertions for diagnostics
//!
//! This module provides helpers for snapshot testing with insta.
//! Diagnostics are formatted consistently for readable snapshots.

use markup_types::Diagnostic;

/// Format a list of diagnostics for snapshot testing.
///
/// One line per diagnostic: `[n] line:column severity message (rule)`,
/// with the end position and fix range appended when present.
#[must_use]
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut line = format!(
                "[{}] {}:{} {} {}",
                i + 1,
                d.line,
                d.column,
                d.severity,
                d.message
            );
            if let (Some(end_line), Some(end_column)) = (d.end_line, d.end_column) {
                line.push_str(&format!(" ..{end_line}:{end_column}"));
            }
            if let Some(rule) = &d.rule_id {
                line.push_str(&format!(" ({rule})"));
            }
            if let Some(fix) = &d.fix {
                line.push_str(&format!(" fix={} {:?}", fix.range, fix.text));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup_types::Fix;

    #[test]
    fn test_format_diagnostics_empty() {
        assert_eq!(format_diagnostics(&[]), "(no diagnostics)");
    }

    #[test]
    fn test_format_diagnostics_full() {
        let diagnostics = vec![
            Diagnostic::error(2, 5, "unexpected token").with_rule("parse"),
            Diagnostic::warning(4, 1, "trailing whitespace")
                .with_end(4, 3)
                .with_fix(Fix::delete(30, 32)),
        ];
        let formatted = format_diagnostics(&diagnostics);
        assert_eq!(
            formatted,
            "[1] 2:5 error unexpected token (parse)\n\
             [2] 4:1 warning trailing whitespace ..4:3 fix=30..32 \"\""
        );
    }
}
