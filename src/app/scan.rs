// Logtail - app/scan.rs
//
// One-shot reading: a single pass over a line source to end of input.
//
// Used for standard input and for sequential (non-follow) file viewing.
// No loop beyond the input and no suspension: the pass returns as soon as
// the reader reports end of input.

use crate::app::source::{LineReader, SourceLine};
use crate::core::classifier;
use crate::core::filter::{self, LineFilter};
use crate::util::error::{LogtailError, Result, SourceError};
use std::io::{self, BufRead};
use std::path::Path;

/// Counters for a completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read from the source, including filtered-out lines.
    pub lines_read: u64,
    /// Lines that passed the filter and were emitted.
    pub lines_emitted: u64,
}

/// Read `reader` to end of input, emitting every line that passes `filter`.
///
/// `name` identifies the source in error messages. Filtered-out lines still
/// advance the line numbering. A final line without a trailing newline is
/// emitted too. A read error stops the pass and is returned; lines emitted
/// before it stay emitted.
pub fn scan_lines<R, F>(
    reader: R,
    name: &Path,
    filter: Option<&LineFilter>,
    mut emit: F,
) -> Result<ScanStats>
where
    R: BufRead,
    F: FnMut(SourceLine) -> io::Result<()>,
{
    let mut lines = LineReader::new(reader);
    let mut stats = ScanStats::default();

    loop {
        let next = lines.next_complete().map_err(|e| SourceError::Read {
            path: name.to_path_buf(),
            source: e,
        })?;
        let Some(line) = next.or_else(|| lines.finish()) else {
            break;
        };

        stats.lines_read += 1;
        if !filter::passes(filter, &line.text) {
            continue;
        }

        let entry = classifier::classify(&line.text);
        emit(SourceLine {
            source: 0,
            line_number: line.number,
            entry,
        })
        .map_err(LogtailError::Output)?;
        stats.lines_emitted += 1;
    }

    tracing::debug!(
        source = %name.display(),
        lines = stats.lines_read,
        emitted = stats.lines_emitted,
        "Scan complete"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use std::io::Cursor;

    fn collect(input: &str, filter: Option<&LineFilter>) -> (ScanStats, Vec<SourceLine>) {
        let mut seen = Vec::new();
        let stats = scan_lines(Cursor::new(input), Path::new("test.log"), filter, |line| {
            seen.push(line);
            Ok(())
        })
        .unwrap();
        (stats, seen)
    }

    #[test]
    fn test_scan_classifies_every_line() {
        let (stats, seen) = collect(
            "2024-09-30T10:30:45.123Z INFO Application started\n\
             2024-09-30T10:30:46.456Z ERROR Database connection failed",
            None,
        );
        assert_eq!(stats, ScanStats { lines_read: 2, lines_emitted: 2 });
        assert_eq!(seen[0].entry.level, Level::Info);
        assert_eq!(seen[1].entry.level, Level::Error);
        assert_eq!(seen[1].line_number, 2);
    }

    #[test]
    fn test_filtered_lines_keep_numbering() {
        let filter = LineFilter::compile("ERROR").unwrap();
        let (stats, seen) = collect(
            "INFO a\nERROR b\nINFO c\nINFO d\nERROR e\n",
            filter.as_ref(),
        );
        assert_eq!(stats, ScanStats { lines_read: 5, lines_emitted: 2 });
        let numbers: Vec<_> = seen.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![2, 5]);
    }

    #[test]
    fn test_empty_input() {
        let (stats, seen) = collect("", None);
        assert_eq!(stats, ScanStats::default());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_emit_failure_is_output_error() {
        let result = scan_lines(Cursor::new("a\nb\n"), Path::new("x"), None, |_| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        assert!(matches!(result, Err(ref e) if e.is_broken_pipe()));
    }

    #[test]
    fn test_read_failure_is_source_error() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }
        let reader = io::BufReader::new(Failing);
        let result = scan_lines(reader, Path::new("dev.log"), None, |_| Ok(()));
        match result {
            Err(LogtailError::Source(SourceError::Read { path, .. })) => {
                assert_eq!(path, Path::new("dev.log"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
