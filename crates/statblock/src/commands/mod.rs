//! CLI command implementations.

mod check;
mod convert;

use std::path::{Path, PathBuf};

use clap::Args;
use statblock_config::{CliSettings, Config, SpellsConfig};
use statblock_format::{AbilityFormatter, CategoryOutput};
use statblock_parser::{PlainParagraphs, Segmenter};
use statblock_spells::{SpellBook, SpellError};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;

/// Arguments shared by commands that read a markdown sheet.
#[derive(Args)]
pub(crate) struct SheetArgs {
    /// Markdown sheet to read.
    #[arg(short, long)]
    input: PathBuf,

    /// JSON spell list (overrides config; default: built-in SRD list).
    #[arg(long, env = "STATBLOCK_SPELLS")]
    spells: Option<PathBuf>,

    /// Fail on roll expressions with unsupported dice.
    #[arg(long)]
    strict_dice: bool,

    /// Drop paragraphs that have no bold ability name.
    #[arg(long)]
    drop_plain: bool,

    /// Path to configuration file (default: auto-discover statblock.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show every warning and enable info logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SheetArgs {
    /// Load configuration with these arguments applied on top.
    fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            output_dir,
            spells_path: self.spells.clone(),
            strict_dice: self.strict_dice.then_some(true),
            plain_paragraphs: self.drop_plain.then_some(PlainParagraphs::Drop),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build the spell dictionary from configuration.
fn load_spell_book(config: &SpellsConfig) -> Result<SpellBook, SpellError> {
    let mut book = match &config.path {
        Some(path) => SpellBook::load(path)?,
        None => SpellBook::builtin(),
    };
    book.extend(&config.extra);
    Ok(book)
}

/// Read, segment and format a markdown sheet.
fn convert_sheet(input: &Path, config: &Config) -> Result<Vec<CategoryOutput>, CliError> {
    let markdown = std::fs::read_to_string(input).map_err(|source| CliError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let document = Segmenter::new()
        .with_plain_paragraphs(config.parser.plain_paragraphs)
        .segment(&markdown);
    tracing::info!(
        input = %input.display(),
        abilities = document.total(),
        "Parsed sheet"
    );

    let spells = load_spell_book(&config.spells_resolved)?;
    tracing::info!(spells = spells.len(), "Loaded spell dictionary");

    let outputs = AbilityFormatter::new(&spells)
        .with_strict_dice(config.dice.strict)
        .format_document(&document)?;
    Ok(outputs)
}

/// Warnings collected before a formatting failure, tagged with the failing
/// category. Empty for any other error.
fn failure_warnings(err: &CliError) -> Vec<String> {
    let CliError::Format(err) = err else {
        return Vec::new();
    };
    err.warnings
        .iter()
        .map(|warning| format!("[{}] {warning}", err.category))
        .collect()
}

/// Warnings of all categories, tagged with their category.
fn collect_warnings(outputs: &[CategoryOutput]) -> Vec<String> {
    outputs
        .iter()
        .flat_map(CategoryOutput::tagged_warnings)
        .collect()
}
