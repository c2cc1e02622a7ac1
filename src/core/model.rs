// Logtail - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// presentation dependencies.

use chrono::{DateTime, FixedOffset};

// =============================================================================
// Log Entry (output of classification)
// =============================================================================

/// One classified log line.
///
/// Created fresh for every line and never mutated afterwards. When no level
/// token was found, `level` is `Level::Unknown` and `message` is the raw
/// text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unmodified source text (line terminator removed).
    pub raw: String,

    /// Best-effort timestamp. `None` when no known pattern matched.
    /// Layouts without a zone are interpreted as UTC.
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// Normalised severity level.
    pub level: Level,

    /// The semantic payload: text after the level token, or the whole line.
    pub message: String,
}

impl LogEntry {
    /// Entry for a line that carried no recognisable structure.
    pub fn unstructured(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            timestamp: None,
            level: Level::Unknown,
            message: raw.to_string(),
        }
    }
}

// =============================================================================
// Level
// =============================================================================

/// Normalised severity levels.
///
/// Synonyms found in log text (`WARNING`, `ERR`, `PANIC`) are folded into
/// these variants by `Level::from_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    #[default]
    Unknown,
}

impl Level {
    /// Map a level keyword (any case) to its normalised level.
    ///
    /// Returns `None` for anything that is not one of the recognised
    /// keywords or synonyms.
    pub fn from_token(token: &str) -> Option<Level> {
        let level = match token.to_ascii_uppercase().as_str() {
            "TRACE" => Level::Trace,
            "DEBUG" => Level::Debug,
            "INFO" => Level::Info,
            "WARN" | "WARNING" => Level::Warn,
            "ERROR" | "ERR" => Level::Error,
            "FATAL" | "PANIC" => Level::Fatal,
            _ => return None,
        };
        Some(level)
    }

    /// Upper-case label, as printed in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Unknown => "UNKNOWN",
        }
    }

    /// `Error` and `Fatal`.
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error | Level::Fatal)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Level::Warn)
    }

    /// `Info` and the more verbose `Debug` and `Trace`.
    pub fn is_info(&self) -> bool {
        matches!(self, Level::Info | Level::Debug | Level::Trace)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
