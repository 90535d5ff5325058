//! Top-level diagnostic error type.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives. [`QfocusError`] wraps them so callers that build a whole
//! analyzer can propagate any of them with `?` and keep the codes and help
//! text intact.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::lexicon::{CategoryMapError, LexiconError};
use crate::question::AnalysisError;
use crate::syntax::SyntaxError;

#[derive(Debug, Error, Diagnostic)]
pub enum QfocusError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CategoryMap(#[from] CategoryMapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type alias using [`QfocusError`].
pub type QfocusResult<T> = std::result::Result<T, QfocusError>;
