//! Per-document remapping state and the translation fold.

use markup_config::MarkupConfig;
use markup_extract::{extract, RegionRecord};
use markup_types::{Diagnostic, LineIndex, OffsetRange, Position};

use crate::error::{RemapError, Result};

/// Per-document remapping state.
///
/// Lifecycle: [`prepare`](Self::prepare) filters the document before the
/// analyzer runs; [`attach_filtered_lines`](Self::attach_filtered_lines)
/// completes the context once the filtered buffer's tokenized form exists;
/// [`remap_diagnostics`](Self::remap_diagnostics) consumes it. A context
/// describes exactly one document and is discarded afterwards.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Line-start table of the original buffer (`None` when no regions were
    /// found, in which case the buffers are identical)
    source_lines: Option<LineIndex>,
    /// Region records in scan order
    regions: Vec<RegionRecord>,
    /// Line-start table of the filtered buffer, attached after analysis
    filtered_lines: Option<LineIndex>,
}

impl AnalysisContext {
    /// Filter `text` and capture everything needed to invert the
    /// substitutions later. Returns the context and the filtered buffer to
    /// hand to the analyzer.
    #[tracing::instrument(skip_all, fields(len = text.len()))]
    #[must_use]
    pub fn prepare(text: &str, config: &MarkupConfig) -> (Self, String) {
        let extraction = extract(text, config);
        let context = Self {
            source_lines: extraction.source_lines,
            regions: extraction.regions,
            filtered_lines: None,
        };
        (context, extraction.filtered)
    }

    /// Record the filtered buffer's line-start table once its tokenized
    /// form is available. Must be called before any translation.
    pub fn attach_filtered_lines(&mut self, lines: LineIndex) {
        self.filtered_lines = Some(lines);
    }

    /// The region records captured for this document, in scan order.
    #[must_use]
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    /// Returns `true` if the document contained any markup spans.
    #[must_use]
    pub fn has_regions(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Translate a filtered-buffer byte offset to an original-buffer offset.
    ///
    /// Walks the region list in order, re-inflating every substitution at
    /// or before the running value. Comparing the running value against
    /// each region's start in *original* coordinates is sound because the
    /// regions are ordered left to right and the fold shifts the running
    /// value past each region before the next comparison.
    pub fn to_original_offset(&self, offset: usize) -> Result<usize> {
        let filtered = self.filtered_lines()?;
        if offset > filtered.len() {
            return Err(RemapError::OffsetOutOfRange {
                offset,
                len: filtered.len(),
            });
        }
        let original = self.reinflate(offset);
        usize::try_from(original).map_err(|_| RemapError::OffsetOutOfRange {
            offset,
            len: filtered.len(),
        })
    }

    /// Translate a filtered-buffer position to an original-buffer position.
    pub fn to_original_position(&self, position: Position) -> Result<Position> {
        let filtered = self.filtered_lines()?;
        let offset =
            filtered
                .position_to_offset(position)
                .ok_or(RemapError::PositionOutOfRange {
                    line: position.line,
                    column: position.column,
                })?;
        let original = self.to_original_offset(offset)?;
        // With no regions the buffers are identical, so the filtered table
        // serves for both.
        let lines = self.source_lines.as_ref().unwrap_or(filtered);
        lines
            .offset_to_position(original)
            .ok_or(RemapError::OffsetOutOfRange {
                offset: original,
                len: lines.len(),
            })
    }

    /// Translate a half-open fix range.
    ///
    /// The end bound is exclusive and must track the last *included*
    /// character's original offset, so it is translated as `f(end - 1) + 1`;
    /// translating the exclusive bound directly would misattribute it across
    /// a region boundary that happens to align with the range end.
    pub fn to_original_fix_range(&self, range: OffsetRange) -> Result<OffsetRange> {
        if range.is_empty() {
            // insertion point, nothing after it to track
            let at = self.to_original_offset(range.start)?;
            return Ok(OffsetRange::at(at));
        }
        Ok(OffsetRange::new(
            self.to_original_offset(range.start)?,
            self.to_original_offset(range.end - 1)? + 1,
        ))
    }

    /// Rewrite `diagnostics` in place so every position and fix range
    /// addresses the original buffer.
    ///
    /// Diagnostics positioned strictly before the first region's start need
    /// no translation: everything up to that point is identical in both
    /// buffers. Once one diagnostic reaches that mark, it and all later
    /// ones are remapped. With no regions the list is left untouched.
    #[tracing::instrument(skip_all, fields(regions = self.regions.len(), count = diagnostics.len()))]
    pub fn remap_diagnostics(&self, diagnostics: &mut [Diagnostic]) -> Result<()> {
        let Some(first) = self.regions.first() else {
            return Ok(());
        };
        let filtered = self.filtered_lines()?;
        let significance_start = first.span.start;

        let mut started = false;
        for diagnostic in &mut *diagnostics {
            if !started {
                let position = diagnostic.position();
                let offset =
                    filtered
                        .position_to_offset(position)
                        .ok_or(RemapError::PositionOutOfRange {
                            line: position.line,
                            column: position.column,
                        })?;
                started = offset >= significance_start;
            }
            if started {
                self.remap_one(diagnostic)?;
            }
        }
        Ok(())
    }

    fn remap_one(&self, diagnostic: &mut Diagnostic) -> Result<()> {
        let position = self.to_original_position(diagnostic.position())?;
        diagnostic.line = position.line;
        diagnostic.column = position.column;

        if let Some(fix) = diagnostic.fix.as_mut() {
            fix.range = self.to_original_fix_range(fix.range)?;
        }

        if let (Some(line), Some(column)) = (diagnostic.end_line, diagnostic.end_column) {
            let end = self.to_original_position(Position::new(line, column))?;
            diagnostic.end_line = Some(end.line);
            diagnostic.end_column = Some(end.column);
        }
        Ok(())
    }

    /// The single additive fold: each substitution's net effect on offsets
    /// is exactly its size delta, and the regions are disjoint and ordered,
    /// so cumulative deltas compose without tracking filtered offsets.
    /// The comparison is at-or-past the start: the first host character
    /// after an erased span shares its offset with the span start in the
    /// filtered buffer and must still re-inflate past it. Signed because a
    /// placeholder longer than its span shifts later offsets left.
    fn reinflate(&self, offset: usize) -> i64 {
        let mut position = offset as i64;
        for region in &self.regions {
            if position >= region.span.start as i64 {
                position += region.delta();
            }
        }
        position
    }

    fn filtered_lines(&self) -> Result<&LineIndex> {
        self.filtered_lines
            .as_ref()
            .ok_or(RemapError::MissingFilteredLines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(text: &str, config: &MarkupConfig) -> (AnalysisContext, String) {
        let (mut context, filtered) = AnalysisContext::prepare(text, config);
        context.attach_filtered_lines(LineIndex::new(&filtered));
        (context, filtered)
    }

    #[test]
    fn test_prepare_without_markup() {
        let (context, filtered) = AnalysisContext::prepare("plain text\n", &MarkupConfig::default());
        assert_eq!(filtered, "plain text\n");
        assert!(!context.has_regions());
    }

    #[test]
    fn test_offset_translation_across_one_region() {
        // "abc<?php x ?>def" -> "abcdef"
        let text = "abc<?php x ?>def";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "abcdef");

        // before the region: unchanged
        assert_eq!(context.to_original_offset(0).unwrap(), 0);
        assert_eq!(context.to_original_offset(2).unwrap(), 2);
        // at and after the erased span: shifted by the span length
        assert_eq!(context.to_original_offset(3).unwrap(), 13);
        assert_eq!(context.to_original_offset(4).unwrap(), 14);
        assert_eq!(context.to_original_offset(6).unwrap(), 16);
    }

    #[test]
    fn test_offset_translation_composes_across_regions() {
        // "a<?php x ?>b<?php y ?>c" -> "abc"
        let text = "a<?php x ?>b<?php y ?>c";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "abc");

        // 'b' sits between the two regions, 'c' after both
        assert_eq!(context.to_original_offset(0).unwrap(), 0);
        assert_eq!(context.to_original_offset(1).unwrap(), 11);
        assert_eq!(context.to_original_offset(2).unwrap(), 22);
        assert_eq!(context.to_original_offset(3).unwrap(), 23);
    }

    #[test]
    fn test_offset_out_of_range_fails_loudly() {
        let (context, _) = prepared("a<?php x ?>b", &MarkupConfig::default());
        let result = context.to_original_offset(99);
        assert_eq!(
            result,
            Err(RemapError::OffsetOutOfRange { offset: 99, len: 2 })
        );
    }

    #[test]
    fn test_translation_requires_attached_lines() {
        let (context, _) = AnalysisContext::prepare("a<?php x ?>b", &MarkupConfig::default());
        assert_eq!(
            context.to_original_offset(0),
            Err(RemapError::MissingFilteredLines)
        );
    }

    #[test]
    fn test_position_translation() {
        // line 2 of the filtered buffer is line 3 of the original
        let text = "<outer>\n<?lang stmt1 ?>\nmore\n<outer/>\n";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "<outer>\nmore\n<outer/>\n");

        let original = context.to_original_position(Position::new(2, 1)).unwrap();
        assert_eq!(original, Position::new(3, 1));
        let original = context.to_original_position(Position::new(2, 3)).unwrap();
        assert_eq!(original, Position::new(3, 3));
    }

    #[test]
    fn test_remap_diagnostics_no_regions_is_identity() {
        let (context, _) = prepared("no markup here\n", &MarkupConfig::default());
        let mut diagnostics = vec![Diagnostic::error(1, 3, "kept as-is")];
        let expected = diagnostics.clone();
        context.remap_diagnostics(&mut diagnostics).unwrap();
        assert_eq!(diagnostics, expected);
    }

    #[test]
    fn test_start_significance_filter() {
        // diagnostics before the first region's start stay untouched
        let text = "var a = 1;\n<?php x ?>\nvar b = 2;\n";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "var a = 1;\nvar b = 2;\n");

        let mut diagnostics = vec![
            Diagnostic::warning(1, 5, "before any region"),
            Diagnostic::warning(2, 5, "after the region"),
        ];
        context.remap_diagnostics(&mut diagnostics).unwrap();
        assert_eq!(diagnostics[0].position(), Position::new(1, 5));
        assert_eq!(diagnostics[1].position(), Position::new(3, 5));
    }

    #[test]
    fn test_remap_carries_end_position() {
        let text = "a;\n<?php x ?>\nlet bb = 1;\n";
        let (context, _) = prepared(text, &MarkupConfig::default());

        let mut diagnostics = vec![Diagnostic::warning(2, 5, "span").with_end(2, 7)];
        context.remap_diagnostics(&mut diagnostics).unwrap();
        assert_eq!(diagnostics[0].position(), Position::new(3, 5));
        assert_eq!(diagnostics[0].end_line, Some(3));
        assert_eq!(diagnostics[0].end_column, Some(7));
    }

    #[test]
    fn test_fix_range_translation_preserves_length() {
        // fix range entirely inside one host-language stretch
        let text = "a;\n<?php x ?>\nlet bb = 1;\n";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "a;\nlet bb = 1;\n");

        // "bb" in the filtered buffer is at 7..9; in the original at 18..20
        assert_eq!(&filtered[7..9], "bb");
        assert_eq!(&text[18..20], "bb");
        let translated = context
            .to_original_fix_range(OffsetRange::new(7, 9))
            .unwrap();
        assert_eq!(translated, OffsetRange::new(18, 20));
        assert_eq!(translated.len(), 2);
    }

    #[test]
    fn test_fix_range_end_not_dragged_across_region_boundary() {
        // "ab<?php x ?>cd" -> "abcd"; a fix covering exactly "ab" must end
        // at the region start, not after the re-inflated region
        let text = "ab<?php x ?>cd";
        let (context, filtered) = prepared(text, &MarkupConfig::default());
        assert_eq!(filtered, "abcd");

        let translated = context
            .to_original_fix_range(OffsetRange::new(0, 2))
            .unwrap();
        assert_eq!(translated, OffsetRange::new(0, 2));
    }

    #[test]
    fn test_empty_fix_range_translates_as_point() {
        let text = "ab<?php x ?>cd";
        let (context, _) = prepared(text, &MarkupConfig::default());
        let translated = context.to_original_fix_range(OffsetRange::at(3)).unwrap();
        assert_eq!(translated, OffsetRange::at(13));
    }

    #[test]
    fn test_round_trip_for_out_of_region_positions() {
        let text = "head\n<?php a ?>\nmiddle\n<?= b ?> tail\n";
        let (context, filtered) = prepared(text, &MarkupConfig::default());

        let source_lines = LineIndex::new(text);
        let filtered_lines = LineIndex::new(&filtered);

        // inverse construction: an original offset outside every span sits
        // left of its original position by the total shrinkage of the
        // regions before it; translating back must recover it exactly
        for offset in 0..=text.len() {
            let in_region = context
                .regions()
                .iter()
                .any(|r| r.span.start <= offset && offset < r.span.end);
            if in_region {
                continue;
            }
            let shift: i64 = context
                .regions()
                .iter()
                .filter(|r| r.span.end <= offset)
                .map(markup_extract::RegionRecord::delta)
                .sum();
            let filtered_offset = usize::try_from(offset as i64 - shift).unwrap();
            assert_eq!(
                context.to_original_offset(filtered_offset).unwrap(),
                offset,
                "offset {offset} did not round-trip"
            );
            let mapped = context
                .to_original_position(filtered_lines.position_at(filtered_offset))
                .unwrap();
            assert_eq!(mapped, source_lines.position_at(offset));
        }
    }
}
