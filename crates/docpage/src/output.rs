//! Terminal output for CLI commands.
//!
//! Everything goes to stderr so `docpage resolve` output never mixes with
//! data a caller might pipe.

use console::{Style, Term};

/// Line flavor.
#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Good,
    Warn,
    Bad,
    Title,
}

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn style(tone: Tone) -> Style {
        match tone {
            Tone::Plain => Style::new(),
            Tone::Good => Style::new().green(),
            Tone::Warn => Style::new().yellow(),
            Tone::Bad => Style::new().red(),
            Tone::Title => Style::new().cyan().bold(),
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&Self::style(tone).apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Good, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Bad, msg);
    }

    /// Section title of a report.
    pub(crate) fn title(&self, msg: &str) {
        self.line(Tone::Title, msg);
    }

    /// `label: value` with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = Style::new().dim().apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("{label} {value}"));
    }

    /// Table of contents line: heading label followed by its dimmed anchor.
    pub(crate) fn toc_entry(&self, label: &str, slug: &str) {
        let anchor = Style::new().dim().apply_to(format!("#{slug}"));
        let _ = self.term.write_line(&format!("  {label}  {anchor}"));
    }
}
