// Logtail - ui/highlight.rs
//
// Inline highlight detection for lines without a severity level.
//
// Every detector runs over the unmodified line, spans are sorted by start
// offset, and overlapping spans are dropped (earliest wins, detector order
// breaks ties). Working on offsets rather than rewriting an already
// coloured string keeps escape codes from being matched by later passes.
// Word boundaries and whitespace are ASCII, as in the classifier.

use crate::ui::theme::Highlight;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// A highlighted byte range of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub range: Range<usize>,
    pub kind: Highlight,
}

fn detectors() -> &'static [(Highlight, Regex)] {
    static DETECTORS: OnceLock<Vec<(Highlight, Regex)>> = OnceLock::new();
    DETECTORS.get_or_init(|| {
        let table = [
            (Highlight::Url, r"https?://[^\t\n\x0C\r ]+"),
            (
                Highlight::Address,
                r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)",
            ),
            (
                Highlight::ErrorKeyword,
                r"(?i)(?-u:\b)(?:error|exception|failed|failure|panic|fatal)(?-u:\b)",
            ),
            (
                Highlight::WarningKeyword,
                r"(?i)(?-u:\b)(?:warning|warn|deprecated|obsolete)(?-u:\b)",
            ),
        ];
        table
            .into_iter()
            .map(|(kind, pattern)| {
                let re = Regex::new(pattern).expect("highlight: invalid detector regex");
                (kind, re)
            })
            .collect()
    })
}

/// Find non-overlapping highlight spans in `line`, ordered by offset.
pub fn find_highlights(line: &str) -> Vec<HighlightSpan> {
    let mut candidates: Vec<HighlightSpan> = detectors()
        .iter()
        .flat_map(|(kind, re)| {
            re.find_iter(line).map(move |m| HighlightSpan {
                range: m.range(),
                kind: *kind,
            })
        })
        .collect();
    candidates.sort_by_key(|span| (span.range.start, span.kind));

    let mut spans: Vec<HighlightSpan> = Vec::with_capacity(candidates.len());
    for span in candidates {
        let overlaps = spans
            .last()
            .is_some_and(|prev| span.range.start < prev.range.end);
        if !overlaps {
            spans.push(span);
        }
    }
    spans
}
