//! Layered configuration
//!
//! `defaults/pratt.default.toml` is embedded into the crate so that the documented
//! defaults and the runtime behavior stay in sync. Applications layer their own files
//! and key overrides on top through [`Loader`] before deserializing into
//! [`PrattConfig`], which knows how to assemble the configured [`Grammar`].

use crate::pratt::parsing::{Grammar, GrammarPresets};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/pratt.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PrattConfig {
    pub lexing: LexingConfig,
    pub parsing: ParsingConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexingConfig {
    #[serde(default)]
    pub line_comment: Option<String>,
    #[serde(default)]
    pub block_comment: Option<BlockCommentConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockCommentConfig {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    #[serde(default)]
    pub statement_separator: Option<String>,
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    pub context_lines: usize,
}

/// Operator sets from [`GrammarPresets`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Literals,
    Arithmetic,
    Logical,
    Bitwise,
    Assignment,
    Conditional,
    Grouping,
    Blocks,
}

impl Preset {
    pub fn apply(self, grammar: &mut Grammar) {
        match self {
            Preset::Literals => grammar.add_common_literals(),
            Preset::Arithmetic => grammar.add_arithmetic_operators(),
            Preset::Logical => grammar.add_logical_operators(),
            Preset::Bitwise => grammar.add_bitwise_operators(),
            Preset::Assignment => grammar.add_assignment(),
            Preset::Conditional => grammar.add_conditional(),
            Preset::Grouping => grammar.add_grouping(),
            Preset::Blocks => grammar.add_blocks(),
        };
    }
}

impl PrattConfig {
    /// Assemble the grammar this configuration describes.
    pub fn build_grammar(&self) -> Grammar {
        let mut grammar = Grammar::new();
        for preset in &self.parsing.presets {
            preset.apply(&mut grammar);
        }
        if let Some(marker) = self.lexing.line_comment.as_deref().filter(|m| !m.is_empty()) {
            grammar.set_line_comment(marker);
        }
        if let Some(comment) = &self.lexing.block_comment {
            grammar.set_block_comment(&comment.start, &comment.end);
        }
        if let Some(separator) = self
            .parsing
            .statement_separator
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            grammar.set_statement_separator(separator);
        }
        tracing::debug!(presets = ?self.parsing.presets, "built grammar from configuration");
        grammar
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PrattConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a user's own configuration lives: `$XDG_CONFIG_HOME/pratt/pratt.toml`, else
/// `$HOME/.config/pratt/pratt.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("pratt").join("pratt.toml"))
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PrattConfig, ConfigError> {
    Loader::new().build()
}
