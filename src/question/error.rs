//! Diagnostic error types for question analysis.

use miette::Diagnostic;
use thiserror::Error;

/// Stage ordering violations on an [`AnalyzedQuestion`](super::AnalyzedQuestion).
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    #[error("part-of-speech tags set before tokens")]
    #[diagnostic(
        code(qfocus::analysis::tags_without_tokens),
        help("Call set_tokens before set_pos_tags.")
    )]
    TagsWithoutTokens,

    #[error("{tags} tags for {tokens} tokens")]
    #[diagnostic(
        code(qfocus::analysis::tag_count_mismatch),
        help("Tags must be aligned one-to-one with tokens.")
    )]
    TagCountMismatch { tokens: usize, tags: usize },

    #[error("parse tree set before tokens and tags")]
    #[diagnostic(
        code(qfocus::analysis::tree_without_tags),
        help("Set tokens and part-of-speech tags before the parse tree.")
    )]
    TreeWithoutTags,

    #[error("parse tree yield \"{found}\" does not match tokens \"{expected}\"")]
    #[diagnostic(
        code(qfocus::analysis::tree_yield_mismatch),
        help("The tree must be a parse of exactly the question's tokens.")
    )]
    TreeYieldMismatch { expected: String, found: String },
}

/// Result type for question analysis.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
