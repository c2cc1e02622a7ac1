// Logtail - ui/theme.rs
//
// Semantic colour categories and their terminal styles.
// No dependencies on app state or I/O.

use crate::core::model::Level;
use owo_colors::Style;

/// Rendering category of a whole line, decided from its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// `Error` and `Fatal`.
    Error,
    /// `Warn`.
    Warning,
    /// `Info`.
    Info,
    /// `Debug` and `Trace`.
    Debug,
    /// No level: the line keeps its own colours apart from inline highlights.
    Plain,
}

impl Tone {
    pub fn for_level(level: Level) -> Tone {
        if level.is_error() {
            Tone::Error
        } else if level.is_warning() {
            Tone::Warning
        } else if level == Level::Info {
            Tone::Info
        } else if level.is_info() {
            Tone::Debug
        } else {
            Tone::Plain
        }
    }
}

/// Inline highlight categories applied inside `Tone::Plain` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Highlight {
    Url,
    Address,
    ErrorKeyword,
    WarningKeyword,
}

/// Terminal style for a whole-line tone.
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Error => Style::new().red().bold(),
        Tone::Warning => Style::new().yellow().bold(),
        Tone::Info => Style::new().cyan(),
        Tone::Debug => Style::new().magenta(),
        Tone::Plain => Style::new(),
    }
}

/// Terminal style for an inline highlight.
pub fn highlight_style(highlight: Highlight) -> Style {
    match highlight {
        Highlight::Url => Style::new().blue(),
        Highlight::Address => Style::new().cyan(),
        Highlight::ErrorKeyword => tone_style(Tone::Error),
        Highlight::WarningKeyword => tone_style(Tone::Warning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_a_tone() {
        assert_eq!(Tone::for_level(Level::Fatal), Tone::Error);
        assert_eq!(Tone::for_level(Level::Error), Tone::Error);
        assert_eq!(Tone::for_level(Level::Warn), Tone::Warning);
        assert_eq!(Tone::for_level(Level::Info), Tone::Info);
        assert_eq!(Tone::for_level(Level::Debug), Tone::Debug);
        assert_eq!(Tone::for_level(Level::Trace), Tone::Debug);
        assert_eq!(Tone::for_level(Level::Unknown), Tone::Plain);
    }

    #[test]
    fn test_error_style_emits_escapes() {
        let styled = format!("{}", tone_style(Tone::Error).style("boom"));
        assert!(styled.contains("\u{1b}["), "got {styled:?}");
        assert!(styled.contains("boom"));
    }
}
