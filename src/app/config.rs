// Logtail - app/config.rs
//
// Validated run configuration.
//
// Everything that can be rejected is rejected here, before any source is
// opened: the filter pattern is compiled eagerly and follow mode without
// files is refused. The resulting `ViewConfig` is threaded explicitly
// through the session and into the renderer.

use crate::core::filter::LineFilter;
use crate::util::constants::FOLLOW_POLL_INTERVAL_MS;
use crate::util::error::ConfigError;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

/// The options of one run, after validation.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Files to view, in argument order. Empty means standard input.
    pub paths: Vec<PathBuf>,

    /// Compiled line filter; `None` lets every line through.
    pub filter: Option<LineFilter>,

    /// Whether rendered output carries terminal colour codes.
    pub colour: bool,

    /// Keep polling the files for appended lines after the backfill.
    pub follow: bool,

    /// Prefix each line with its 1-based line number.
    pub line_numbers: bool,

    /// Idle sleep between empty follow passes.
    pub poll_interval: Duration,
}

impl ViewConfig {
    /// Validate raw options into a run configuration.
    ///
    /// `colour` is taken as given; callers decide whether the output
    /// supports colour (see [`colour_supported`]).
    pub fn new(
        paths: Vec<PathBuf>,
        filter_pattern: Option<&str>,
        colour: bool,
        follow: bool,
        line_numbers: bool,
    ) -> Result<Self, ConfigError> {
        if follow && paths.is_empty() {
            return Err(ConfigError::FollowWithoutFiles);
        }

        let filter = match filter_pattern {
            Some(pattern) => LineFilter::compile(pattern)?,
            None => None,
        };

        tracing::debug!(
            files = paths.len(),
            filter = filter.as_ref().map(LineFilter::pattern),
            colour,
            follow,
            line_numbers,
            "Configuration validated"
        );

        Ok(Self {
            paths,
            filter,
            colour,
            follow,
            line_numbers,
            poll_interval: Duration::from_millis(FOLLOW_POLL_INTERVAL_MS),
        })
    }

    /// Override the follow-mode idle sleep.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// True when reading standard input rather than files.
    pub fn reads_stdin(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Whether colour should be emitted on stdout: it must be a terminal and
/// `NO_COLOR` must not be set.
pub fn colour_supported() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
