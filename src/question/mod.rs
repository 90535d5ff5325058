//! Question focus extraction and rule-based classification.
//!
//! ## Pipeline
//!
//! 1. [`PatternCascade`]: ordered surface and tree patterns. A match may
//!    classify the question outright (a placeholder) and record a target word.
//! 2. [`FocusExtractor`]: without a placeholder, the head finder picks the
//!    headword, which is then extended to a compound known to the lexicon.
//! 3. [`QuestionAnalyzer`]: resolves the headword to a category label by
//!    hypernym search over the lexicon.
//! 4. [`RulesClassifier`]: turns the resolved label, or a fallback pattern
//!    vote, into one [`QuestionCategory`] of the active [`LabelSet`].

pub mod analyzed;
pub mod analyzer;
pub mod category;
pub mod error;
pub mod focus;
pub mod patterns;
pub mod rules;

pub use analyzed::AnalyzedQuestion;
pub use analyzer::{DEFAULT_PLURAL_CARDINALITY, QuestionAnalyzer, cardinality};
pub use category::{LabelSet, QuestionCategory, UnknownCategory, coarsen};
pub use error::{AnalysisError, AnalysisResult};
pub use focus::{Focus, FocusExtractor};
pub use patterns::{PatternCascade, PatternInput, PatternMatch, PatternRule, Subject};
pub use rules::RulesClassifier;
