//! Prints step and task progress as colored status lines.

use std::io::{stdout, Stdout, Write};

use crossterm::style::Stylize;
use mh_qa_core::progress::Progress;

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: String) {
        // Progress output is best effort
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

impl<W: Write> Progress for Reporter<W> {
    fn start(&mut self, title: &str) {
        self.line(format!("{} {title}", "…".cyan()));
    }

    fn done(&mut self, title: &str) {
        self.line(format!("{} {title}", "✔".green()));
    }

    fn skip(&mut self, title: &str) {
        self.line(format!(
            "{} {}",
            "↓".dark_grey(),
            format!("{title} [skipped]").dark_grey()
        ));
    }

    fn fail(&mut self, title: &str) {
        self.line(format!("{} {}", "✖".red(), title.red()));
    }

    fn warn(&mut self, message: &str) {
        self.line(format!("{} {}", "⚠".yellow(), message.yellow()));
    }
}
