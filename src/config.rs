//! Analyzer configuration, read from TOML.
//!
//! ```toml
//! [analysis]
//! tokenizer = "ptb"
//! parse_bank = "data/parses.mrg"
//! category_map = "data/category_map.xml"
//! all_senses = false
//!
//! [lexicon]
//! path = "data/lexicon.json"
//!
//! [classification]
//! labels = "fine"
//! ```
//!
//! Relative resource paths are resolved against the directory of the config
//! file.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::question::LabelSet;
use crate::syntax::TokenizerKind;

/// Errors from loading a configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(qfocus::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(qfocus::config::parse),
        help(
            "Check the TOML syntax. [analysis] needs `parse_bank` and `category_map`, \
             [lexicon] needs `path`; `tokenizer` is \"ptb\" or \"simple\" and \
             `labels` is \"fine\" or \"coarse\"."
        )
    )]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    pub analysis: AnalysisConfig,
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub tokenizer: TokenizerKind,
    /// Pre-parsed trees, one bracketed tree per line.
    pub parse_bank: PathBuf,
    /// Synset offset → category label XML.
    pub category_map: PathBuf,
    /// Try every sense of the headword instead of the first only.
    #[serde(default)]
    pub all_senses: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    /// JSON lexicon file.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub labels: LabelSet,
}

impl AnalyzerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&content, base, &path.display().to_string())
    }

    /// Parse TOML text, resolving relative paths against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> ConfigResult<Self> {
        Self::parse(text, base_dir, "<memory>")
    }

    fn parse(text: &str, base_dir: &Path, origin: &str) -> ConfigResult<Self> {
        let mut config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.resolve_paths(base_dir);
        tracing::debug!(
            origin,
            tokenizer = %config.analysis.tokenizer,
            labels = ?config.classification.labels,
            all_senses = config.analysis.all_senses,
            "loaded analyzer config"
        );
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.analysis.parse_bank,
            &mut self.analysis.category_map,
            &mut self.lexicon.path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
