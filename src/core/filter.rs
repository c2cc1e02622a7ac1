// Logtail - core/filter.rs
//
// Line filter predicate.
// Core layer: pure logic, no I/O.
//
// The filter is applied to the raw line text before classification. Lines
// it rejects still count towards their source's line numbering.

use crate::util::error::ConfigError;
use regex::Regex;

/// Compiled `--filter` pattern.
#[derive(Debug, Clone)]
pub struct LineFilter {
    regex: Regex,
}

impl LineFilter {
    /// Compile a filter pattern.
    ///
    /// Returns `Ok(None)` for an empty pattern (no filtering) and a
    /// configuration error if the pattern is not a valid regex.
    pub fn compile(pattern: &str) -> Result<Option<Self>, ConfigError> {
        if pattern.is_empty() {
            return Ok(None);
        }
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidFilter {
            pattern: pattern.to_string(),
            source: e,
        })?;
        Ok(Some(Self { regex }))
    }

    /// True if the line contains a match anywhere.
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// The pattern as given on the command line.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Apply an optional filter: `None` passes every line.
pub fn passes(filter: Option<&LineFilter>, line: &str) -> bool {
    filter.map_or(true, |f| f.matches(line))
}
