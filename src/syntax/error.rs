//! Diagnostic error types for the syntax subsystem.
//!
//! Covers bracketed tree reading and parse bank loading. Head finding and
//! tokenization never fail: a tree always has a head and any string tokenizes.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while reading trees or loading parser resources.
#[derive(Debug, Error, Diagnostic)]
pub enum SyntaxError {
    #[error("empty tree input")]
    #[diagnostic(
        code(qfocus::syntax::empty_tree),
        help("A bracketed tree needs at least one node, e.g. \"(ROOT (NN dog))\".")
    )]
    EmptyTree,

    #[error("unbalanced parentheses in tree: \"{input}\"")]
    #[diagnostic(
        code(qfocus::syntax::unbalanced),
        help(
            "Every \"(\" must be closed by a matching \")\". \
             Check that the parser output was not truncated."
        )
    )]
    Unbalanced { input: String },

    #[error("unexpected token \"{token}\" at position {position} in tree")]
    #[diagnostic(
        code(qfocus::syntax::unexpected_token),
        help(
            "Bracketed trees have the shape \"(LABEL child child ...)\". \
             A leaf must appear inside a labelled node."
        )
    )]
    UnexpectedToken { token: String, position: usize },

    #[error("trailing input after tree: \"{rest}\"")]
    #[diagnostic(
        code(qfocus::syntax::trailing_input),
        help("Only one tree per line is allowed. Split multiple trees onto separate lines.")
    )]
    TrailingInput { rest: String },

    #[error("failed to read parse bank: {path}")]
    #[diagnostic(
        code(qfocus::syntax::parse_bank_io),
        help("Ensure the parse bank file exists and is readable.")
    )]
    ParseBankIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tree on line {line} of parse bank {path}")]
    #[diagnostic(
        code(qfocus::syntax::parse_bank_line),
        help(
            "Each non-comment line of a parse bank must hold exactly one \
             Penn Treebank bracketed tree."
        )
    )]
    ParseBankLine {
        path: String,
        line: usize,
        #[source]
        source: Box<SyntaxError>,
    },
}

/// Result type for syntax operations.
pub type SyntaxResult<T> = std::result::Result<T, SyntaxError>;
