// Logtail - app/session.rs
//
// One viewing run: picks the input mode from the configuration and writes
// rendered lines to the output.
//
// Modes:
//   - no files            -> one pass over standard input
//   - files, no follow    -> one pass over each file in order, with a
//                            `==> path <==` header when there are several
//   - files, follow       -> backfill then poll (see app/follow.rs), with
//                            a `[name] ` prefix when there are several
//
// In every mode all files are checked by opening them before anything is
// written, so a missing file fails the run with no partial output.

use crate::app::config::ViewConfig;
use crate::app::follow;
use crate::app::scan::{self, ScanStats};
use crate::app::source::SourceLine;
use crate::ui::render::Renderer;
use crate::util::error::{LogtailError, Result, SourceError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// Display name used for standard input in diagnostics.
const STDIN_NAME: &str = "<stdin>";

/// Run a configured view, writing to `out`.
///
/// `cancel` only matters in follow mode, where it is the sole way the run
/// ends without an error.
pub fn run<W: Write>(config: &ViewConfig, out: &mut W, cancel: &AtomicBool) -> Result<()> {
    let renderer = Renderer::new(config.colour, config.line_numbers);

    if config.reads_stdin() {
        tracing::debug!("Reading standard input");
        let stdin = io::stdin();
        view_reader(stdin.lock(), Path::new(STDIN_NAME), config, renderer, out)?;
        return Ok(());
    }

    if config.follow {
        follow_files(config, renderer, out, cancel)
    } else {
        view_files(config, renderer, out)
    }
}

/// One pass over `reader`, writing every line that passes the filter.
pub fn view_reader<R: BufRead, W: Write>(
    reader: R,
    name: &Path,
    config: &ViewConfig,
    renderer: Renderer,
    out: &mut W,
) -> Result<ScanStats> {
    let stats = scan::scan_lines(reader, name, config.filter.as_ref(), |line| {
        write_line(out, &renderer, None, &line)
    })?;
    out.flush().map_err(LogtailError::Output)?;
    Ok(stats)
}

/// Sequential viewing of every configured file.
///
/// Every file is opened once up front so a missing one fails before any
/// output, then closed again. Each file is reopened only when its turn
/// comes, so at most one descriptor is held however many files are given.
pub fn view_files<W: Write>(config: &ViewConfig, renderer: Renderer, out: &mut W) -> Result<()> {
    for path in &config.paths {
        open_source(path)?;
    }

    let with_headers = config.paths.len() > 1;
    for (index, path) in config.paths.iter().enumerate() {
        let file = open_source(path)?;
        if with_headers {
            if index > 0 {
                writeln!(out).map_err(LogtailError::Output)?;
            }
            writeln!(out, "{}", Renderer::file_header(path)).map_err(LogtailError::Output)?;
        }
        view_reader(BufReader::new(file), path, config, renderer, out)?;
    }
    Ok(())
}

fn open_source(path: &Path) -> std::result::Result<File, SourceError> {
    File::open(path).map_err(|e| SourceError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Follow every configured file until `cancel` is set or a source fails.
pub fn follow_files<W: Write>(
    config: &ViewConfig,
    renderer: Renderer,
    out: &mut W,
    cancel: &AtomicBool,
) -> Result<()> {
    let prefixed = config.paths.len() > 1;
    follow::follow(
        &config.paths,
        config.filter.as_ref(),
        cancel,
        config.poll_interval,
        |line| {
            let prefix = prefixed.then(|| config.paths[line.source].as_path());
            write_line(out, &renderer, prefix, &line)?;
            // Followed output is read live, so each line goes out immediately.
            out.flush()
        },
    )
}

fn write_line<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    prefix: Option<&Path>,
    line: &SourceLine,
) -> io::Result<()> {
    let text = renderer.render_line(prefix, line.line_number, &line.entry);
    writeln!(out, "{text}")
}
