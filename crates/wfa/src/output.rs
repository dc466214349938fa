//! Status lines on stderr.
//!
//! stdout is reserved for the HTML report, so every message goes through
//! [`Output`] on stderr.

use std::path::Path;

use console::{Style, Term};
use wfa_analysis::Diagnostic;

/// How a status line is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
    Muted,
}

impl Tone {
    fn style(self) -> Option<Style> {
        match self {
            Self::Plain => None,
            Self::Success => Some(Style::new().green()),
            Self::Warning => Some(Style::new().yellow()),
            Self::Error => Some(Style::new().red()),
            Self::Heading => Some(Style::new().cyan().bold()),
            Self::Muted => Some(Style::new().dim()),
        }
    }
}

pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        let _ = match tone.style() {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Error, msg);
    }

    /// Section title, e.g. a department in the example list.
    pub(crate) fn heading(&self, msg: &str) {
        self.line(Tone::Heading, msg);
    }

    pub(crate) fn muted(&self, msg: &str) {
        self.line(Tone::Muted, msg);
    }

    /// Confirm that a report landed on disk.
    pub(crate) fn report_written(&self, path: &Path) {
        self.line(
            Tone::Success,
            &format!("Report written to {}", path.display()),
        );
    }

    /// One warning per segment that was recovered during rendering.
    pub(crate) fn diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.line(Tone::Warning, &diagnostic_line(diagnostic));
        }
    }
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::MalformedStructuredBlock { .. } => {
            format!("Warning: tool cards skipped, {diagnostic}")
        }
        Diagnostic::MalformedDiagramSource { .. } => {
            format!("Warning: process map not rendered, {diagnostic}")
        }
    }
}
