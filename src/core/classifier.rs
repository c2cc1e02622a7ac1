// Logtail - core/classifier.rs
//
// Heuristic classification of unstructured log lines.
// Core layer: pure functions over text, no I/O, no shared mutable state.
//
// Three independent extractions run over every line:
//   1. Timestamp: an ordered table of patterns, each paired with an ordered
//      table of datetime layouts. The first pattern (in table order, not by
//      position in the line) whose match parses wins.
//   2. Level: the first case-insensitive whole-word severity keyword.
//   3. Message: the text after the first literal occurrence of that keyword.
//
// Classification never fails. A line without a timestamp or a level is an
// ordinary result (`timestamp: None`, `Level::Unknown`).

use crate::core::model::{Level, LogEntry};
use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Year assigned to timestamps whose layout carries no year (syslog).
///
/// A fixed anchor keeps classification a pure function of the text.
/// Year 0 is a leap year, so `Feb 29` stamps still parse.
const YEAR_LESS_ANCHOR: i64 = 0;

// =============================================================================
// Timestamp tables
// =============================================================================

/// Timestamp shapes recognised inside a line, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimestampPattern {
    /// `2024-09-30T10:30:45.123Z`, `2024-09-30 10:30:45`, `...+02:00`
    Iso8601,
    /// `2024/09/30 10:30:45`
    SlashDateTime,
    /// `09/30/2024 10:30:45`
    UsDateTime,
    /// `Sep 30 10:30:45`
    Syslog,
}

impl TimestampPattern {
    const ALL: [TimestampPattern; 4] = [
        TimestampPattern::Iso8601,
        TimestampPattern::SlashDateTime,
        TimestampPattern::UsDateTime,
        TimestampPattern::Syslog,
    ];

    fn source(self) -> &'static str {
        match self {
            TimestampPattern::Iso8601 => {
                r"[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{3})?(?:Z|[+-][0-9]{2}:[0-9]{2})?"
            }
            TimestampPattern::SlashDateTime => {
                r"[0-9]{4}/[0-9]{2}/[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}"
            }
            TimestampPattern::UsDateTime => r"[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}",
            TimestampPattern::Syslog => r"[0-9A-Za-z_]{3} [0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}",
        }
    }
}

/// Datetime layouts tried, in order, against a matched timestamp substring.
#[derive(Debug, Clone, Copy)]
enum TimestampLayout {
    /// RFC 3339 with mandatory zone (`Z` or `+HH:MM`).
    Rfc3339,
    /// Zone-less layout, interpreted as UTC. `%.f` also accepts no fraction.
    Naive(&'static str),
    /// Zone-less and year-less layout, anchored to `YEAR_LESS_ANCHOR`.
    YearLess(&'static str),
}

const TIMESTAMP_LAYOUTS: &[TimestampLayout] = &[
    TimestampLayout::Rfc3339,
    TimestampLayout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    TimestampLayout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    TimestampLayout::Naive("%Y/%m/%d %H:%M:%S%.f"),
    TimestampLayout::Naive("%m/%d/%Y %H:%M:%S%.f"),
    TimestampLayout::YearLess("%b %d %H:%M:%S"),
];

impl TimestampLayout {
    fn parse(self, text: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            TimestampLayout::Rfc3339 => DateTime::parse_from_rfc3339(text).ok(),
            TimestampLayout::Naive(format) => NaiveDateTime::parse_from_str(text, format)
                .ok()
                .map(|ndt| ndt.and_utc().fixed_offset()),
            TimestampLayout::YearLess(format) => {
                let mut parsed = Parsed::new();
                chrono::format::parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;
                parsed.set_year(YEAR_LESS_ANCHOR).ok()?;
                parsed
                    .to_naive_datetime_with_offset(0)
                    .ok()
                    .map(|ndt| ndt.and_utc().fixed_offset())
            }
        }
    }
}

fn timestamp_patterns() -> &'static [(TimestampPattern, Regex)] {
    static PATTERNS: OnceLock<Vec<(TimestampPattern, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        TimestampPattern::ALL
            .iter()
            .map(|p| {
                let re = Regex::new(p.source()).expect("classifier: invalid timestamp regex");
                (*p, re)
            })
            .collect()
    })
}

fn level_pattern() -> &'static Regex {
    static LEVEL: OnceLock<Regex> = OnceLock::new();
    LEVEL.get_or_init(|| {
        // ASCII word boundaries: a keyword glued to non-ASCII text
        // (`ERROR连接失败`) still counts as a whole word.
        Regex::new(r"(?i)(?-u:\b)(TRACE|DEBUG|INFO|WARN|WARNING|ERROR|ERR|FATAL|PANIC)(?-u:\b)")
            .expect("classifier: invalid level regex")
    })
}

// =============================================================================
// Classification
// =============================================================================

/// Classify one raw line into a `LogEntry`.
///
/// Never fails; any text, including empty strings and control characters,
/// yields an entry.
pub fn classify(line: &str) -> LogEntry {
    let timestamp = extract_timestamp(line);

    let Some((level, token)) = extract_level(line) else {
        return LogEntry {
            timestamp,
            ..LogEntry::unstructured(line)
        };
    };

    LogEntry {
        raw: line.to_string(),
        timestamp,
        level,
        message: message_after(line, token),
    }
}

/// Find the first timestamp pattern (in table order) whose match parses.
///
/// Only the leftmost match of each pattern is considered.
pub fn extract_timestamp(line: &str) -> Option<DateTime<FixedOffset>> {
    timestamp_patterns().iter().find_map(|(_, re)| {
        let found = re.find(line)?;
        parse_timestamp(found.as_str())
    })
}

/// Parse a timestamp substring against the layout table, first success wins.
fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    TIMESTAMP_LAYOUTS.iter().find_map(|layout| layout.parse(text))
}

/// The first whole-word level keyword, normalised, with the text it matched.
fn extract_level(line: &str) -> Option<(Level, &str)> {
    let token = level_pattern().find(line)?.as_str();
    Level::from_token(token).map(|level| (level, token))
}

/// Text after the first literal occurrence of `token`, trimmed.
///
/// Only the token itself is removed. Surrounding punctuation stays, so
/// `[ERROR] rest` yields `] rest`. The literal search may land on an
/// earlier occurrence than the whole-word match (e.g. inside `INFORMATION`).
fn message_after(line: &str, token: &str) -> String {
    match line.find(token) {
        Some(idx) => line[idx + token.len()..].trim().to_string(),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn rfc3339(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    // -------------------------------------------------------------------------
    // Whole-line classification
    // -------------------------------------------------------------------------

    #[test]
    fn test_iso_timestamp_with_info() {
        let entry = classify("2024-09-30T10:30:45.123Z INFO Application started");
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.message, "Application started");
        assert_eq!(entry.timestamp, Some(rfc3339("2024-09-30T10:30:45.123Z")));
    }

    #[test]
    fn test_bracketed_level_keeps_closing_bracket() {
        let line = "[ERROR] 2024-09-30 10:30:45 Something went wrong";
        let entry = classify(line);
        assert_eq!(entry.level, Level::Error);
        assert_eq!(entry.message, "] 2024-09-30 10:30:45 Something went wrong");
        assert_eq!(entry.timestamp, Some(rfc3339("2024-09-30T10:30:45Z")));
        assert_eq!(entry.raw, line);
    }

    #[test]
    fn test_known_formats() {
        let cases = [
            (
                "2024/09/30 10:30:45 ERROR Database connection failed",
                Level::Error,
                "Database connection failed",
                true,
            ),
            (
                "Sep 30 10:30:45 WARN Configuration missing",
                Level::Warn,
                "Configuration missing",
                true,
            ),
            (
                "2024-09-30T10:30:46.456Z DEBUG Loading configuration from config.json",
                Level::Debug,
                "Loading configuration from config.json",
                true,
            ),
            (
                "2024-09-30T10:30:51.901Z FATAL Unable to start server: port 8080 already in use",
                Level::Fatal,
                "Unable to start server: port 8080 already in use",
                true,
            ),
            (
                "2024-09-30 10:30:45 WARNING This is a warning message",
                Level::Warn,
                "This is a warning message",
                true,
            ),
            (
                "2024-09-30 10:30:45 ERR Connection failed",
                Level::Error,
                "Connection failed",
                true,
            ),
            (
                "2024-09-30 10:30:45 PANIC System panic occurred",
                Level::Fatal,
                "System panic occurred",
                true,
            ),
            (
                "2024-09-30T10:30:45.123Z TRACE Entering function processRequest",
                Level::Trace,
                "Entering function processRequest",
                true,
            ),
            (
                "Some unstructured log line without level",
                Level::Unknown,
                "Some unstructured log line without level",
                false,
            ),
        ];

        for (input, level, message, has_time) in cases {
            let entry = classify(input);
            assert_eq!(entry.level, level, "level for {input:?}");
            assert_eq!(entry.message, message, "message for {input:?}");
            assert_eq!(entry.timestamp.is_some(), has_time, "timestamp for {input:?}");
            assert_eq!(entry.raw, input);
        }
    }

    #[test]
    fn test_complex_formats_levels() {
        let cases = [
            (
                r#"192.168.1.1 - - [30/Sep/2024:10:30:45 +0000] "GET /api/health HTTP/1.1" 200 15"#,
                Level::Unknown,
            ),
            (
                "2024-09-30 10:30:45,123 ERROR [main] com.example.App - Connection failed",
                Level::Error,
            ),
            (
                "2024-09-30T10:30:45.123456789Z INFO Starting container...",
                Level::Info,
            ),
            (
                "[2024-09-30 10:30:45] [ERROR] [2024-09-30 10:30:46] Database error occurred",
                Level::Error,
            ),
        ];
        for (input, level) in cases {
            assert_eq!(classify(input).level, level, "level for {input:?}");
        }
    }

    #[test]
    fn test_level_is_case_insensitive_and_whole_word() {
        assert_eq!(classify("user logged in: info ok").level, Level::Info);
        assert_eq!(classify("Warning: disk almost full").level, Level::Warn);
        // Keywords embedded in longer words do not count.
        assert_eq!(classify("INFORMATION only").level, Level::Unknown);
        assert_eq!(classify("errors were reported").level, Level::Unknown);
        assert_eq!(classify("debugger attached").level, Level::Unknown);
    }

    #[test]
    fn test_keyword_next_to_non_ascii_text_is_a_whole_word() {
        let entry = classify("ERROR连接失败");
        assert_eq!(entry.level, Level::Error);
        assert_eq!(entry.message, "连接失败");

        let entry = classify("éINFO x");
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.message, "x");

        let entry = classify("处理INFO完成");
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.message, "完成");
    }

    #[test]
    fn test_first_level_keyword_wins() {
        let entry = classify("DEBUG retrying after ERROR");
        assert_eq!(entry.level, Level::Debug);
        assert_eq!(entry.message, "retrying after ERROR");
    }

    #[test]
    fn test_message_uses_first_literal_occurrence() {
        // The whole-word match is the second INFO; the literal search finds
        // the one inside INFORMATION first.
        let entry = classify("INFORMATION INFO payload");
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.message, "RMATION INFO payload");
    }

    #[test]
    fn test_message_keeps_original_token_case() {
        let entry = classify("2024-09-30 10:30:45 Error: Disk quota exceeded");
        assert_eq!(entry.level, Level::Error);
        assert_eq!(entry.message, ": Disk quota exceeded");
    }

    #[test]
    fn test_level_at_end_of_line_gives_empty_message() {
        let entry = classify("job finished with ERROR");
        assert_eq!(entry.level, Level::Error);
        assert_eq!(entry.message, "");
    }

    #[test]
    fn test_degenerate_inputs_never_fail() {
        for input in ["", " ", "\t\u{1b}[31m\u{7}", "日本語のログ行", "ERROR", "é INFO ü"] {
            let entry = classify(input);
            assert_eq!(entry.raw, input);
        }
        assert_eq!(classify("").level, Level::Unknown);
        assert_eq!(classify("é INFO ü").message, "ü");
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_keyword_means_unknown_and_raw_message() {
        for input in [
            "plain text",
            "GET /index.html 200",
            "  padded  ",
            "2024-09-30T10:30:45Z heartbeat",
        ] {
            let entry = classify(input);
            assert_eq!(entry.level, Level::Unknown);
            assert_eq!(entry.message, input, "message must be verbatim");
        }
    }

    #[test]
    fn test_each_keyword_maps_to_its_level() {
        let cases = [
            ("TRACE", Level::Trace),
            ("DEBUG", Level::Debug),
            ("INFO", Level::Info),
            ("WARN", Level::Warn),
            ("WARNING", Level::Warn),
            ("ERROR", Level::Error),
            ("ERR", Level::Error),
            ("FATAL", Level::Fatal),
            ("PANIC", Level::Fatal),
        ];
        for (keyword, level) in cases {
            let line = format!("service: {keyword} something happened");
            assert_eq!(classify(&line).level, level, "{keyword}");
            let lower = line.to_lowercase();
            assert_eq!(classify(&lower).level, level, "{keyword} lower-case");
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        for input in [
            "2024-09-30T10:30:45.123Z INFO Application started",
            "[ERROR] 2024-09-30 10:30:45 Something went wrong",
            "Sep 30 10:30:45 host sshd[42]: WARNING weak key",
            "no structure at all",
            "",
        ] {
            let first = classify(input);
            assert_eq!(classify(&first.raw), first, "{input:?}");
        }
    }

    // -------------------------------------------------------------------------
    // Timestamp extraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_pattern_order_beats_position() {
        // The syslog stamp comes first in the line, but ISO-8601 is earlier
        // in the pattern table.
        let line = "Sep 30 10:30:45 host app[1]: 2024-09-30T08:00:00Z INFO synced";
        assert_eq!(
            extract_timestamp(line),
            Some(rfc3339("2024-09-30T08:00:00Z"))
        );
    }

    #[test]
    fn test_timestamp_variants() {
        assert_eq!(
            extract_timestamp("at 2024-09-30T10:30:45+02:00 boot"),
            Some(rfc3339("2024-09-30T10:30:45+02:00"))
        );
        assert_eq!(
            extract_timestamp("2024-09-30T10:30:45 local"),
            Some(rfc3339("2024-09-30T10:30:45Z"))
        );
        assert_eq!(
            extract_timestamp("2024/09/30 10:30:45 x"),
            Some(rfc3339("2024-09-30T10:30:45Z"))
        );
        assert_eq!(
            extract_timestamp("09/30/2024 10:30:45 x"),
            Some(rfc3339("2024-09-30T10:30:45Z"))
        );
    }

    #[test]
    fn test_nanosecond_stamp_truncated_to_millis() {
        let ts = extract_timestamp("2024-09-30T10:30:45.123456789Z INFO x").unwrap();
        assert_eq!(ts.nanosecond(), 123_000_000);
        assert_eq!(ts.second(), 45);
    }

    #[test]
    fn test_syslog_stamp_is_anchored_to_fixed_year() {
        let ts = extract_timestamp("Sep 30 10:30:45 kernel: eth0 up").unwrap();
        assert_eq!(ts.year(), 0);
        assert_eq!((ts.month(), ts.day()), (9, 30));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (10, 30, 45));

        let leap = extract_timestamp("Feb 29 00:00:00 leap day").unwrap();
        assert_eq!((leap.month(), leap.day()), (2, 29));
    }

    #[test]
    fn test_unparseable_candidates_yield_none() {
        assert_eq!(extract_timestamp("not-a-timestamp"), None);
        assert_eq!(extract_timestamp("2024-13-45 99:99:99 nonsense"), None);
        assert_eq!(extract_timestamp("abc 12 10:30:45 not a month"), None);
    }

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(timestamp_patterns().len(), TimestampPattern::ALL.len());
        let kinds: Vec<_> = timestamp_patterns().iter().map(|(p, _)| *p).collect();
        assert_eq!(kinds, TimestampPattern::ALL.to_vec());
    }
}
