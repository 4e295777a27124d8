//! `statblock convert` command implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use statblock_format::CategoryOutput;

use super::{SheetArgs, collect_warnings, convert_sheet, failure_warnings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Output directory for generated files (overrides config; default: current directory).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be read or formatted, or if an
    /// output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.sheet.load_config(self.output)?;

        let outputs = convert_sheet(&self.sheet.input, &config)
            .inspect_err(|err| output.warnings(&failure_warnings(err), self.sheet.verbose))?;

        let output_dir = &config.output_resolved.dir;
        std::fs::create_dir_all(output_dir).map_err(|source| CliError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        write_outputs(&outputs, output_dir, &output)?;
        output.warnings(&collect_warnings(&outputs), self.sheet.verbose);

        output.info("");
        output.success("Conversion complete!");
        Ok(())
    }
}

/// Write one file per non-empty category.
///
/// Empty categories get no file; a file left over from an earlier run is
/// removed so the directory matches the sheet.
fn write_outputs(
    outputs: &[CategoryOutput],
    output_dir: &Path,
    output: &Output,
) -> Result<(), CliError> {
    for category_output in outputs {
        let category = category_output.category;
        let path = output_dir.join(category.file_name());

        if category_output.count == 0 {
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "Removed stale output"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(CliError::Write { path, source }),
            }
            output.category_empty(category);
            continue;
        }

        std::fs::write(&path, &category_output.text)
            .map_err(|source| CliError::Write { path, source })?;
        output.category_written(category, category_output.count);
    }
    Ok(())
}
