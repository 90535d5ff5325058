// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # qfocus
//!
//! Question focus extraction and category resolution.
//!
//! Given a question and its constituency parse, qfocus finds what the
//! question asks about (its headword, or a category placeholder for
//! questions recognized by surface patterns) and maps that headword onto a
//! question category by searching a lexical ontology's hypernym hierarchy
//! for a node listed in a category map.
//!
//! ## Architecture
//!
//! - **Syntax** (`syntax`): constituency trees, tokenizers, parse banks and
//!   the question head finder (Collins rules plus wh-overrides)
//! - **Lexicon** (`lexicon`): ontology query trait, petgraph-backed
//!   in-memory lexicon, category map, hypernym search, compound headwords
//! - **Question** (`question`): pattern cascade, focus extraction, the
//!   analyzer pipeline and the rule classifier
//! - **Config** (`config`): TOML analyzer configuration
//!
//! ## Library usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use qfocus::lexicon::{CategoryMap, MemoryLexicon};
//! use qfocus::question::QuestionAnalyzer;
//!
//! let lexicon = MemoryLexicon::load("data/lexicon.json".as_ref()).unwrap();
//! let map = CategoryMap::load("data/category_map.xml".as_ref()).unwrap();
//! let analyzer = QuestionAnalyzer::new(Arc::new(lexicon), Arc::new(map));
//! let category = analyzer.resolve_category("What does NATO stand for?");
//! assert_eq!(category.as_str(), "ABBREVIATION_EXPANSION");
//! ```

pub mod config;
pub mod error;
pub mod lexicon;
pub mod question;
pub mod syntax;

pub use error::{QfocusError, QfocusResult};
