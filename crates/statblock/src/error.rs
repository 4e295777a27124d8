//! CLI error types.

use std::path::PathBuf;

use statblock_config::ConfigError;
use statblock_format::FormatError;
use statblock_spells::SpellError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("failed to read input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load spell list: {0}")]
    Spells(#[from] SpellError),

    #[error("failed to format {0}")]
    Format(#[from] FormatError),

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Validation(String),
}
