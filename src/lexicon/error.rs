//! Diagnostic error types for lexicon and category map loading.
//!
//! Lookups never fail: a word missing from the lexicon is an empty result.
//! These errors are raised only while loading resources, where they abort
//! startup.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building a lexicon.
#[derive(Debug, Error, Diagnostic)]
pub enum LexiconError {
    #[error("failed to read lexicon file: {path}")]
    #[diagnostic(
        code(qfocus::lexicon::io),
        help("Ensure the lexicon file exists and is readable. Check [lexicon] path in the config.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon JSON: {message}")]
    #[diagnostic(
        code(qfocus::lexicon::malformed),
        help(
            "A lexicon file is {{\"name\": ..., \"synsets\": [{{\"id\", \"pos\", \"lemmas\", \
             \"gloss\", \"hypernyms\"}}]}}. Check the reported line and column."
        )
    )]
    Malformed { message: String },

    #[error("duplicate synset id {id}")]
    #[diagnostic(
        code(qfocus::lexicon::duplicate_synset),
        help("Every synset id must be unique within a lexicon.")
    )]
    DuplicateSynset { id: u64 },

    #[error("synset {from} has hypernym {to}, which does not exist")]
    #[diagnostic(
        code(qfocus::lexicon::dangling_hypernym),
        help("Every hypernym id must refer to a synset defined in the same lexicon.")
    )]
    DanglingHypernym { from: u64, to: u64 },
}

/// Result type for lexicon operations.
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;

/// Errors raised while loading a category map.
#[derive(Debug, Error, Diagnostic)]
pub enum CategoryMapError {
    #[error("failed to read category map: {path}")]
    #[diagnostic(
        code(qfocus::category_map::io),
        help("Ensure the category map exists and is readable. Check [analysis] category_map in the config.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed category map XML: {message}")]
    #[diagnostic(
        code(qfocus::category_map::malformed),
        help(
            "Expected <map><category name=\"...\"><target offset=\"...\"/></category></map>."
        )
    )]
    Malformed { message: String },

    #[error("invalid offset \"{offset}\" in category {category}")]
    #[diagnostic(
        code(qfocus::category_map::invalid_offset),
        help("Target offsets must be non-negative integers (synset offsets).")
    )]
    InvalidOffset { category: String, offset: String },
}

/// Result type for category map operations.
pub type CategoryMapResult<T> = std::result::Result<T, CategoryMapError>;
