//! Progress and result reporting for `sitemap` commands.
//!
//! Everything goes to stderr so stdout stays free when the URL list is piped
//! in through `-i -`.

use console::{Style, Term};

/// Reporter for a generation run.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Input and output locations, URL counts.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg, None);
    }

    /// Written sitemap or index.
    pub(crate) fn success(&self, msg: &str) {
        self.line(msg, Some(&self.green));
    }

    /// Chunk files left out of the index.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(msg, Some(&self.yellow));
    }

    /// Failure that ends the run.
    pub(crate) fn error(&self, msg: &str) {
        self.line(msg, Some(&self.red));
    }

    // Reporting is best effort; a closed stderr must not abort generation.
    fn line(&self, msg: &str, style: Option<&Style>) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }
}
