//! `statblock check` command implementation.

use clap::Args;

use super::{SheetArgs, collect_warnings, convert_sheet, failure_warnings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be processed, or
    /// `CliError::Validation` if it produced any warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.sheet.load_config(None)?;

        let outputs = convert_sheet(&self.sheet.input, &config)
            .inspect_err(|err| output.warnings(&failure_warnings(err), true))?;
        for category_output in &outputs {
            output.info(&format!(
                "{}: {} abilities",
                category_output.category, category_output.count
            ));
        }

        let warnings = collect_warnings(&outputs);
        if warnings.is_empty() {
            output.success("No warnings.");
            return Ok(());
        }

        output.warnings(&warnings, true);
        Err(CliError::Validation(format!(
            "{} warning(s) found",
            warnings.len()
        )))
    }
}
