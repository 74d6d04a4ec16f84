//! Forward-scanning extractor for embedded PHP markup.

use markup_config::MarkupConfig;
use markup_types::{LineIndex, OffsetRange, Range};

use crate::region::RegionRecord;

const OPEN: &str = "<?";
const CLOSE: &str = "?>";

/// Result of filtering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The document with every markup span replaced by its placeholder
    pub filtered: String,
    /// One record per substitution, in scan order
    pub regions: Vec<RegionRecord>,
    /// Line-start table of the source, built on the first match
    /// (`None` when the document contained no markup)
    pub source_lines: Option<LineIndex>,
}

/// Replace every `<? ... ?>` span in `text` with its configured placeholder.
///
/// The scan moves strictly forward: each match is consumed before the next
/// search starts, so spans never overlap and records come out ordered by
/// start offset. An opening delimiter with no closing `?>` before end of
/// input is left in place as literal text, along with everything after it.
///
/// A document without markup comes back unchanged, with no records.
#[tracing::instrument(skip_all, fields(len = text.len()))]
#[must_use]
pub fn extract(text: &str, config: &MarkupConfig) -> Extraction {
    let mut filtered = String::with_capacity(text.len());
    let mut regions: Vec<RegionRecord> = Vec::new();
    let mut source_lines: Option<LineIndex> = None;
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(OPEN) {
        let open_at = cursor + found;
        let Some(close) = text[open_at + OPEN.len()..].find(CLOSE) else {
            tracing::debug!(offset = open_at, "opener without closer, rest kept as literal text");
            break;
        };
        let close_end = open_at + OPEN.len() + close + CLOSE.len();

        let lines = source_lines.get_or_insert_with(|| LineIndex::new(text));
        let span = adjust_span(text, open_at, close_end, config);
        let replacement = placeholder(text, open_at, config);

        filtered.push_str(&text[cursor..span.start]);
        filtered.push_str(replacement);
        regions.push(RegionRecord::new(
            span,
            Range::new(lines.position_at(span.start), lines.position_at(span.end)),
            replacement.len(),
        ));
        cursor = span.end;
    }
    filtered.push_str(&text[cursor..]);

    tracing::debug!(
        regions = regions.len(),
        filtered_len = filtered.len(),
        "extraction complete"
    );
    Extraction {
        filtered,
        regions,
        source_lines,
    }
}

/// The byte after `<?` picks the span kind: `=` marks a value-emitting block.
fn placeholder<'a>(text: &str, open_at: usize, config: &'a MarkupConfig) -> &'a str {
    if text.as_bytes().get(open_at + OPEN.len()) == Some(&b'=') {
        &config.replacement.emit
    } else {
        &config.replacement.plain
    }
}

const fn is_inline_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Length of the line terminator at `offset` (`\n` or `\r\n`), 0 if none.
fn newline_len(text: &str, offset: usize) -> usize {
    match text.as_bytes().get(offset) {
        Some(b'\n') => 1,
        Some(b'\r') if text.as_bytes().get(offset + 1) == Some(&b'\n') => 2,
        _ => 0,
    }
}

/// Apply the whitespace and line-ending options to a raw delimiter span.
///
/// Leading whitespace is only ever absorbed when the line-ending-adjusted
/// span itself ends at a line boundary: absorbing it under a placeholder
/// that stays mid-line would corrupt column arithmetic for everything after
/// the placeholder on that line.
fn adjust_span(text: &str, open_at: usize, close_end: usize, config: &MarkupConfig) -> OffsetRange {
    let bytes = text.as_bytes();
    let mut end = close_end;

    if config.collapse_whitespace {
        // Trailing spaces/tabs are absorbed only when the run reaches a line
        // terminator (or end of input), where it would survive as trailing
        // whitespace beside the placeholder.
        let mut probe = end;
        while bytes.get(probe).copied().is_some_and(is_inline_whitespace) {
            probe += 1;
        }
        if probe == bytes.len() || newline_len(text, probe) > 0 {
            end = probe;
        }
    }

    let ends_line = newline_len(text, end) > 0;
    if ends_line && !config.keep_line_ending {
        end += newline_len(text, end);
    }

    let mut start = open_at;
    if config.collapse_whitespace {
        if ends_line || end == bytes.len() {
            while start > 0 && is_inline_whitespace(bytes[start - 1]) {
                start -= 1;
            }
        }
    } else if config.collapse_blank_line && ends_line {
        let mut probe = open_at;
        while probe > 0 && is_inline_whitespace(bytes[probe - 1]) {
            probe -= 1;
        }
        if probe == 0 || bytes[probe - 1] == b'\n' {
            start = probe;
        }
    }

    OffsetRange::new(start, end)
}
