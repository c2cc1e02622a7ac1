// Logtail - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Classification never produces an error: a line with no timestamp or no
// level is a normal outcome, not a failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Logtail operations.
/// Errors are categorised by the stage that produced them.
#[derive(Debug)]
pub enum LogtailError {
    /// Configuration was rejected before any I/O took place.
    Config(ConfigError),

    /// A line source could not be opened or read.
    Source(SourceError),

    /// Writing rendered output failed.
    Output(io::Error),
}

impl fmt::Display for LogtailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Source(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "Cannot write output: {e}"),
        }
    }
}

impl std::error::Error for LogtailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl LogtailError {
    /// True when the error is a closed output pipe (e.g. `logtail app.log | head`).
    ///
    /// The binary treats this as a normal end of the run.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors detected while validating the run configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The `--filter` pattern is not a valid regular expression.
    InvalidFilter {
        pattern: String,
        source: regex::Error,
    },

    /// `--follow` was requested while reading standard input.
    FollowWithoutFiles,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter { pattern, source } => {
                write!(f, "invalid regex pattern '{pattern}': {source}")
            }
            Self::FollowWithoutFiles => {
                write!(f, "--follow requires at least one file argument")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFilter { source, .. } => Some(source),
            Self::FollowWithoutFiles => None,
        }
    }
}

impl From<ConfigError> for LogtailError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

/// Errors raised while opening or reading a line source.
#[derive(Debug)]
pub enum SourceError {
    /// The file could not be opened.
    Open { path: PathBuf, source: io::Error },

    /// Reading failed part-way through the source.
    Read { path: PathBuf, source: io::Error },
}

impl SourceError {
    /// Path of the source that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } => path,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open file {}: {source}", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "error reading file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<SourceError> for LogtailError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

/// Convenience type alias for Logtail results.
pub type Result<T> = std::result::Result<T, LogtailError>;
