//! Colored terminal output for conversion reports.

use console::{Style, Term};
use statblock_parser::AbilityCategory;

/// Terminal report writer (stderr).
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// `✓ Actions: 3 abilities written to actions.txt`
    pub(crate) fn category_written(&self, category: AbilityCategory, count: usize) {
        self.success(&format!(
            "✓ {category}: {count} abilities written to {}",
            category.file_name()
        ));
    }

    /// `- Reactions: empty (no file created)`
    pub(crate) fn category_empty(&self, category: AbilityCategory) {
        self.styled(
            &self.dim,
            &format!("- {category}: empty (no file created)"),
        );
    }

    /// Print collected warnings, or only their count unless `verbose`.
    pub(crate) fn warnings(&self, warnings: &[String], verbose: bool) {
        if warnings.is_empty() {
            return;
        }

        self.info("");
        self.styled(&self.yellow, "Warnings:");
        if verbose {
            for warning in warnings {
                self.styled(&self.yellow, &format!("  ! {warning}"));
            }
        } else {
            self.info(&format!(
                "  {} warning(s) found. Use --verbose for details.",
                warnings.len()
            ));
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
