//! Configuration management for statblock.
//!
//! Parses `statblock.toml` with serde and auto-discovers the file in the
//! current directory and its parents. CLI flags are applied on top through
//! [`CliSettings`].
//!
//! ```toml
//! [output]
//! dir = "sheets"
//!
//! [spells]
//! path = "${CAMPAIGN_DIR}/spells.json"
//! extra = ["Tasha's Caustic Brew"]
//!
//! [parser]
//! plain_paragraphs = "drop"
//!
//! [dice]
//! strict = true
//! ```
//!
//! `output.dir` and `spells.path` are resolved relative to the config file and
//! support `~`, `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use statblock_parser::PlainParagraphs;

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override spell list path.
    pub spells_path: Option<PathBuf>,
    /// Override strict dice handling.
    pub strict_dice: Option<bool>,
    /// Override handling of paragraphs without a bold name.
    pub plain_paragraphs: Option<PlainParagraphs>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "statblock.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Spell dictionary configuration (paths are relative strings from TOML).
    spells: SpellsConfigRaw,
    /// Markdown parsing configuration.
    pub parser: ParserConfig,
    /// Dice conversion configuration.
    pub dice: DiceConfig,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved spell dictionary configuration (set after loading).
    #[serde(skip)]
    pub spells_resolved: SpellsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory the per-category files are written to.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SpellsConfigRaw {
    path: Option<String>,
    extra: Vec<String>,
}

/// Resolved spell dictionary configuration.
#[derive(Debug, Default)]
pub struct SpellsConfig {
    /// JSON spell list to load instead of the built-in list.
    pub path: Option<PathBuf>,
    /// Additional spell names (homebrew).
    pub extra: Vec<String>,
}

/// Markdown parsing configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Handling of paragraphs without a bold name.
    pub plain_paragraphs: PlainParagraphs,
}

/// Dice conversion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Fail on roll expressions with unsupported dice instead of leaving them
    /// unconverted.
    pub strict: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`spells.path`").
        field: String,
        /// Error message (e.g., "${`SPELLS_DIR`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `statblock.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(spells_path) = &settings.spells_path {
            self.spells_resolved.path = Some(spells_path.clone());
        }
        if let Some(strict) = settings.strict_dice {
            self.dice.strict = strict;
        }
        if let Some(policy) = settings.plain_paragraphs {
            self.parser.plain_paragraphs = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfigRaw::default(),
            spells: SpellsConfigRaw::default(),
            parser: ParserConfig::default(),
            dice: DiceConfig::default(),
            output_resolved: OutputConfig {
                dir: base.to_path_buf(),
            },
            spells_resolved: SpellsConfig::default(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.validate()?;
        config.expand_paths()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate raw configuration values.
    ///
    /// Called automatically when loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a configured path or spell name
    /// is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.dir {
            require_non_empty(dir, "output.dir")?;
        }
        if let Some(path) = &self.spells.path {
            require_non_empty(path, "spells.path")?;
        }
        for name in &self.spells.extra {
            require_non_empty(name, "spells.extra")?;
        }
        Ok(())
    }

    fn expand_paths(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.dir {
            self.output.dir = Some(expand::expand_path(dir, "output.dir")?);
        }
        if let Some(path) = &self.spells.path {
            self.spells.path = Some(expand::expand_path(path, "spells.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: self
                .output
                .dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
        };
        self.spells_resolved = SpellsConfig {
            path: self.spells.path.as_deref().map(|path| config_dir.join(path)),
            extra: self.spells.extra.clone(),
        };
    }
}
