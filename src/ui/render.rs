// Logtail - ui/render.rs
//
// Turns classified lines into output text.
//
// Layout of one rendered line:
//   [<display name>] <line number>: <content>
// Both the prefix and the line-number field are optional. Colour
// enablement is a plain value handed in at construction.

use crate::core::model::LogEntry;
use crate::ui::highlight;
use crate::ui::theme::{self, Tone};
use crate::util::constants::LINE_NUMBER_WIDTH;
use std::fmt::Write as _;
use std::path::Path;

/// Renders log lines according to the run's output options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    colour: bool,
    line_numbers: bool,
}

impl Renderer {
    pub fn new(colour: bool, line_numbers: bool) -> Self {
        Self {
            colour,
            line_numbers,
        }
    }

    /// Render one line. `source_name` is set when several sources share
    /// the output and lines need a `[name] ` prefix.
    pub fn render_line(
        &self,
        source_name: Option<&Path>,
        line_number: u64,
        entry: &LogEntry,
    ) -> String {
        let mut out = String::with_capacity(entry.raw.len() + 16);
        if let Some(name) = source_name {
            let _ = write!(out, "[{}] ", name.display());
        }
        if self.line_numbers {
            let _ = write!(out, "{line_number:>width$}: ", width = LINE_NUMBER_WIDTH);
        }
        self.push_content(&mut out, entry);
        out
    }

    /// The `==> path <==` banner printed before each file when several
    /// files are viewed one after another.
    pub fn file_header(path: &Path) -> String {
        format!("==> {} <==", path.display())
    }

    fn push_content(&self, out: &mut String, entry: &LogEntry) {
        if !self.colour {
            out.push_str(&entry.raw);
            return;
        }
        match Tone::for_level(entry.level) {
            Tone::Plain => push_highlighted(out, &entry.raw),
            tone => {
                let _ = write!(out, "{}", theme::tone_style(tone).style(&entry.raw));
            }
        }
    }
}

/// Copy `line` into `out`, styling the inline highlight spans.
fn push_highlighted(out: &mut String, line: &str) {
    let mut cursor = 0;
    for span in highlight::find_highlights(line) {
        out.push_str(&line[cursor..span.range.start]);
        let text = &line[span.range.clone()];
        let _ = write!(out, "{}", theme::highlight_style(span.kind).style(text));
        cursor = span.range.end;
    }
    out.push_str(&line[cursor..]);
}
