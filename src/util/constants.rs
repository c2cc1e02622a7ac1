// Logtail - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logtail";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Follow mode
// =============================================================================

/// Idle sleep between poll passes that produced no new lines (ms).
///
/// Bounds the busy-poll cost of follow mode while keeping the worst-case
/// latency for new content at roughly this interval.
pub const FOLLOW_POLL_INTERVAL_MS: u64 = 100;

/// How often the cancel flag is checked within one idle sleep (ms).
pub const FOLLOW_CANCEL_CHECK_INTERVAL_MS: u64 = 25;

// =============================================================================
// Reading
// =============================================================================

/// Capacity of the buffered reader wrapped around each source.
pub const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KB

// =============================================================================
// Output
// =============================================================================

/// Width of the right-aligned line-number field.
pub const LINE_NUMBER_WIDTH: usize = 6;

// =============================================================================
// Logging
// =============================================================================

/// Default diagnostic log level. Diagnostics go to stderr, so the default
/// stays quiet enough not to interleave with viewed output.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;
