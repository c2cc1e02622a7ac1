// Logtail - app/follow.rs
//
// Follow mode: backfill every file, then poll for newly appended lines.
//
// Architecture:
//   - `FollowScheduler` owns one `SourceCursor` per file, in argument order.
//   - A cooperative loop on the calling thread visits every cursor per
//     pass, draining all complete lines of a source before moving on.
//   - The only suspension point is the idle sleep after a pass that read
//     nothing. The sleep is sliced so a cancel request is seen promptly.
//   - An `AtomicBool` cancel flag ends the loop between passes.
//
// Ordering: per-source FIFO, round-robin across sources by pass. Output is
// not globally time-ordered.
//
// Failure model:
//   - Sources are all opened before any line is emitted. The first open
//     failure aborts; later sources are never opened.
//   - A read error on any source ends the whole loop.
//   - A file that shrinks below its read offset (truncated or rewritten in
//     place) is re-read from the start; its line numbering continues.
//
// Partial lines: backfill emits a final line that has no newline yet, so
// the whole current content is shown. Bytes appended after it form a new
// line. During polling an unterminated line is held until its newline
// arrives.

use crate::app::source::{LineReader, SourceLine};
use crate::core::classifier;
use crate::core::filter::{self, LineFilter};
use crate::util::constants::{
    FOLLOW_CANCEL_CHECK_INTERVAL_MS, FOLLOW_POLL_INTERVAL_MS, READ_BUFFER_SIZE,
};
use crate::util::error::{LogtailError, Result, SourceError};
use crate::util::logging;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// =============================================================================
// Per-file cursor
// =============================================================================

/// How far one file has been read.
#[derive(Debug)]
struct SourceCursor {
    /// Path as given on the command line; also the display name.
    path: PathBuf,
    reader: LineReader<BufReader<File>>,
}

impl SourceCursor {
    fn open(path: &Path) -> std::result::Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: LineReader::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
        })
    }

    fn read_error(&self, source: io::Error) -> SourceError {
        SourceError::Read {
            path: self.path.clone(),
            source,
        }
    }

    /// Rewind if the file is now shorter than what was already consumed.
    fn check_truncation(&mut self) -> std::result::Result<(), SourceError> {
        let len = self
            .reader
            .get_ref()
            .get_ref()
            .metadata()
            .map_err(|e| self.read_error(e))?
            .len();

        if len < self.reader.offset() {
            tracing::info!(
                file = %self.path.display(),
                old_offset = self.reader.offset(),
                new_size = len,
                "Follow: file truncated, re-reading from start"
            );
            self.reader.rewind().map_err(|e| self.read_error(e))?;
        }
        Ok(())
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// How far `drain_source` reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drain {
    /// Everything, including an unterminated final line (backfill).
    ToEnd,
    /// Newline-terminated lines only (polling).
    CompleteLines,
}

/// Polls a fixed, ordered set of files for new lines.
#[derive(Debug)]
pub struct FollowScheduler {
    cursors: Vec<SourceCursor>,
    poll_interval: Duration,
}

impl FollowScheduler {
    /// Open every path in order.
    ///
    /// Stops at the first failure: nothing has been read at that point and
    /// the remaining paths are never opened.
    pub fn open(paths: &[PathBuf]) -> std::result::Result<Self, SourceError> {
        let mut cursors = Vec::with_capacity(paths.len());
        for path in paths {
            let cursor = SourceCursor::open(path)?;
            tracing::debug!(file = %path.display(), "Follow: opened source");
            cursors.push(cursor);
        }
        Ok(Self {
            cursors,
            poll_interval: Duration::from_millis(FOLLOW_POLL_INTERVAL_MS),
        })
    }

    /// Override the idle sleep between empty passes.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Display name (the path as given) of source `index`.
    pub fn display_name(&self, index: usize) -> Option<&Path> {
        self.cursors.get(index).map(|c| c.path.as_path())
    }

    /// Lines read so far from source `index`, filtered-out lines included.
    pub fn line_counter(&self, index: usize) -> Option<u64> {
        self.cursors.get(index).map(|c| c.reader.lines_read())
    }

    /// Read every source from the beginning to its current end.
    ///
    /// A final line without a newline is emitted too. Returns the number
    /// of lines read.
    pub fn backfill<F>(&mut self, filter: Option<&LineFilter>, emit: &mut F) -> Result<u64>
    where
        F: FnMut(SourceLine) -> io::Result<()>,
    {
        let mut total = 0;
        for index in 0..self.cursors.len() {
            let read = self.drain_source(index, filter, Drain::ToEnd, emit)?;
            tracing::debug!(
                file = %self.cursors[index].path.display(),
                lines = read,
                "Follow: backfill complete"
            );
            total += read;
        }
        Ok(total)
    }

    /// One poll pass: visit every source in order and drain its new lines.
    ///
    /// Returns the number of lines read across all sources, including lines
    /// the filter rejected.
    pub fn poll_pass<F>(&mut self, filter: Option<&LineFilter>, emit: &mut F) -> Result<u64>
    where
        F: FnMut(SourceLine) -> io::Result<()>,
    {
        let mut total = 0;
        for index in 0..self.cursors.len() {
            total += self.drain_source(index, filter, Drain::CompleteLines, emit)?;
        }
        if total > 0 {
            tracing::debug!(lines = total, "Follow: pass read new lines");
        }
        Ok(total)
    }

    /// Poll until `cancel` is set or a source fails.
    ///
    /// Sleeps `poll_interval` after every pass that read nothing.
    pub fn run<F>(
        &mut self,
        filter: Option<&LineFilter>,
        cancel: &AtomicBool,
        emit: &mut F,
    ) -> Result<()>
    where
        F: FnMut(SourceLine) -> io::Result<()>,
    {
        tracing::debug!(
            sources = self.cursors.len(),
            interval_ms = self.poll_interval.as_millis() as u64,
            "Follow: polling started"
        );

        loop {
            if cancel.load(Ordering::SeqCst) {
                tracing::debug!("Follow: cancelled");
                return Ok(());
            }
            if self.poll_pass(filter, emit)? == 0 {
                self.idle(cancel);
            }
        }
    }

    /// Interruptible sleep of one poll interval.
    fn idle(&self, cancel: &AtomicBool) {
        let slice = self
            .poll_interval
            .min(Duration::from_millis(FOLLOW_CANCEL_CHECK_INTERVAL_MS));
        let mut slept = Duration::ZERO;
        while slept < self.poll_interval {
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            std::thread::sleep(slice);
            slept += slice;
        }
    }

    /// Drain the lines currently available from one source.
    fn drain_source<F>(
        &mut self,
        index: usize,
        filter: Option<&LineFilter>,
        drain: Drain,
        emit: &mut F,
    ) -> Result<u64>
    where
        F: FnMut(SourceLine) -> io::Result<()>,
    {
        let cursor = &mut self.cursors[index];
        cursor.check_truncation()?;

        let mut read = 0;
        loop {
            let next = cursor
                .reader
                .next_complete()
                .map_err(|e| cursor.read_error(e))?;
            let line = match (next, drain) {
                (Some(line), _) => line,
                (None, Drain::ToEnd) => match cursor.reader.finish() {
                    Some(line) => line,
                    None => break,
                },
                (None, Drain::CompleteLines) => break,
            };
            read += 1;

            if !filter::passes(filter, &line.text) {
                continue;
            }

            tracing::trace!(
                file = %cursor.path.display(),
                line_number = line.number,
                preview = logging::preview(&line.text),
                "Follow: line"
            );

            let entry = classifier::classify(&line.text);
            emit(SourceLine {
                source: index,
                line_number: line.number,
                entry,
            })
            .map_err(LogtailError::Output)?;
        }
        Ok(read)
    }
}

/// Follow `paths`: open all, backfill each in order, then poll until
/// `cancel` is set or a source fails.
pub fn follow<F>(
    paths: &[PathBuf],
    filter: Option<&LineFilter>,
    cancel: &AtomicBool,
    poll_interval: Duration,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(SourceLine) -> io::Result<()>,
{
    let mut scheduler = FollowScheduler::open(paths)?.with_poll_interval(poll_interval);
    scheduler.backfill(filter, &mut emit)?;
    scheduler.run(filter, cancel, &mut emit)
}
