//! Error types for spell dictionary loading.

use std::path::PathBuf;

/// Error loading a spell dictionary.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    /// Spell list file could not be read.
    #[error("failed to read spell list {}: {source}", path.display())]
    Read {
        /// Path of the spell list.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Spell list is not a JSON array of strings.
    #[error("failed to parse spell list: {0}")]
    Parse(#[from] serde_json::Error),
}
