//! Case-insensitive spell name dictionary.

use std::collections::HashSet;
use std::path::Path;

use crate::SpellError;

/// SRD spell list shipped with the crate.
const BUILTIN_SPELLS: &str = include_str!("../data/spells.json");

/// Set of known spell names.
///
/// Names are stored lowercased; lookups are case-insensitive. A book is
/// read-only once built and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SpellBook {
    names: HashSet<String>,
}

impl SpellBook {
    /// Create an empty spell book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spell book from the built-in SRD spell list.
    ///
    /// # Panics
    ///
    /// Panics if the embedded spell list is not valid JSON, which the test
    /// suite rules out.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SPELLS).expect("built-in spell list is a JSON array of strings")
    }

    /// Parse a JSON array of spell names.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::Parse`] if `json` is not an array of strings.
    pub fn from_json(json: &str) -> Result<Self, SpellError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Ok(names.into_iter().collect())
    }

    /// Load a JSON array of spell names from a file.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::Read`] if the file cannot be read, or
    /// [`SpellError::Parse`] if it is not an array of strings.
    pub fn load(path: &Path) -> Result<Self, SpellError> {
        let content = std::fs::read_to_string(path).map_err(|source| SpellError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), count = book.len(), "Loaded spell list");
        Ok(book)
    }

    /// Check whether `name` is a known spell, ignoring case.
    ///
    /// The empty name is never a known spell.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.names.contains(&name.to_lowercase())
    }

    /// Number of distinct spell names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the book has no spells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SpellBook {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut book = Self::new();
        book.extend(iter);
        book
    }
}

impl<S: AsRef<str>> Extend<S> for SpellBook {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names
            .extend(iter.into_iter().map(|name| name.as_ref().to_lowercase()));
    }
}
