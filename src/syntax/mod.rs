//! Syntax: constituency trees, head finding, tokenization and parsing.

pub mod error;
pub mod head_finder;
pub mod head_rules;
pub mod parser;
pub mod tokenizer;
pub mod tree;

pub use error::{SyntaxError, SyntaxResult};
pub use head_finder::{HeadFinder, HeadOverride};
pub use head_rules::{Direction, HeadRule, HeadRuleTable};
pub use parser::{NoParser, ParseBank, ParserCache, SyntacticParser};
pub use tokenizer::{PtbTokenizer, SimpleTokenizer, Tokenizer, TokenizerKind};
pub use tree::Tree;
