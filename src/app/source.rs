// Logtail - app/source.rs
//
// Complete-line extraction over any buffered byte stream.
//
// A `LineReader` hands out newline-terminated lines only. Bytes after the
// final newline are an in-progress line: they stay in `pending` until a
// later read completes them (follow mode) or the caller flushes them at
// end of input (one-shot mode).
//
// Encoding: lines are decoded as lossy UTF-8. A trailing `\r` is dropped
// along with the `\n`, so CRLF files render cleanly.

use crate::core::model::LogEntry;
use std::io::{self, BufRead, Seek, SeekFrom};

/// One emitted line, handed to the output side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Index of the source in argument order (0 for standard input).
    pub source: usize,
    /// 1-based position of the line in its source, counting filtered lines.
    pub line_number: u64,
    /// The classified line. `entry.raw` is the line as read.
    pub entry: LogEntry,
}

/// A decoded line together with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: u64,
    pub text: String,
}

/// Reads complete lines from `R` and tracks the consumed byte offset.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    /// Bytes of the current, not yet newline-terminated line.
    pending: Vec<u8>,
    /// Bytes consumed from the underlying stream so far.
    offset: u64,
    /// Lines handed out so far. Never reset.
    lines_read: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            offset: 0,
            lines_read: 0,
        }
    }

    /// Return the next newline-terminated line, or `None` if the stream has
    /// no complete line available right now.
    ///
    /// `None` is not end-of-stream for a growing file: calling again after
    /// more data has been appended picks up where the last call stopped.
    pub fn next_complete(&mut self) -> io::Result<Option<RawLine>> {
        let n = self.reader.read_until(b'\n', &mut self.pending)?;
        self.offset += n as u64;
        if self.pending.last() != Some(&b'\n') {
            return Ok(None);
        }
        Ok(Some(self.take_pending()))
    }

    /// Flush an unterminated final line at end of input.
    pub fn finish(&mut self) -> Option<RawLine> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take_pending())
        }
    }

    fn take_pending(&mut self) -> RawLine {
        let mut bytes = std::mem::take(&mut self.pending);
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        self.lines_read += 1;
        RawLine {
            number: self.lines_read,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl<R> LineReader<R> {
    /// Bytes consumed from the stream, including any pending fragment.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Lines handed out so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }
}

impl<R: Seek> LineReader<R> {
    /// Restart from the beginning of the stream after a truncation.
    ///
    /// Drops any pending fragment. The line counter keeps counting.
    pub fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.offset = 0;
        self.pending.clear();
        Ok(())
    }
}
