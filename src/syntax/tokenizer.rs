//! Question tokenizers.
//!
//! Two tokenizers are provided:
//!
//! - [`PtbTokenizer`]: Penn Treebank conventions, matching the token stream the
//!   treebank parsers are trained on (`What's` → `What 's`, `"` → ``` `` ```/`''`,
//!   sentence-final period split off, abbreviations such as `U.S.` kept whole).
//! - [`SimpleTokenizer`]: alphanumeric runs and single punctuation marks.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

/// Splits question text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Which tokenizer the analyzer builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Ptb,
    Simple,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Ptb => Box::new(PtbTokenizer),
            TokenizerKind::Simple => Box::new(SimpleTokenizer),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Ptb => f.write_str("ptb"),
            TokenizerKind::Simple => f.write_str("simple"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ptb" => Ok(TokenizerKind::Ptb),
            "simple" | "lingpipe" => Ok(TokenizerKind::Simple),
            other => Err(format!("unknown tokenizer \"{other}\"")),
        }
    }
}

// ── Penn Treebank rules ─────────────────────────────────────────────────

static RE_OPEN_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|[\s(\[{<])""#).unwrap());
static RE_CLOSE_QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"""#).unwrap());
static RE_ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\.\.").unwrap());
static RE_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([;@#$%&?!])").unwrap());
static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,:])([^0-9]|$)").unwrap());
static RE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\]\[(){}<>])").unwrap());
static RE_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--").unwrap());
static RE_FINAL_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([^.])\.([\])}>"']*)\s*$"#).unwrap());
static RE_CLITIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([^' ])('s|'m|'d|'ll|'re|'ve|n't) ").unwrap()
});
static RE_CANNOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(can)(not)\b").unwrap());

/// Penn Treebank style tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtbTokenizer;

impl Tokenizer for PtbTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let text: String = text.nfc().collect();
        let s = RE_OPEN_QUOTE.replace_all(&text, "$1 `` ");
        let s = RE_ELLIPSIS.replace_all(&s, " ... ");
        let s = RE_PUNCT.replace_all(&s, " $1 ");
        let s = RE_SEPARATOR.replace_all(&s, " $1 $2");
        let s = RE_BRACKET.replace_all(&s, " $1 ");
        let s = RE_DASHES.replace_all(&s, " -- ");
        let s = RE_FINAL_PERIOD.replace_all(&s, "$1 . $2");
        let s = RE_CLOSE_QUOTE.replace_all(&s, " '' ");
        let padded = format!(" {s} ");
        let s = RE_CLITIC.replace_all(&padded, "$1 $2 ");
        let s = RE_CANNOT.replace_all(&s, "$1 $2");
        s.split_whitespace().map(str::to_string).collect()
    }
}

static RE_SIMPLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+|\S").unwrap());

/// Alphanumeric runs and single punctuation marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let text: String = text.nfc().collect();
        RE_SIMPLE_TOKEN
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ptb(s: &str) -> Vec<String> {
        PtbTokenizer.tokenize(s)
    }

    #[test]
    fn splits_question_mark() {
        assert_eq!(
            ptb("What does NATO stand for?"),
            vec!["What", "does", "NATO", "stand", "for", "?"]
        );
    }

    #[test]
    fn splits_clitics() {
        assert_eq!(
            ptb("What's the capital of France?"),
            vec!["What", "'s", "the", "capital", "of", "France", "?"]
        );
        assert_eq!(ptb("Why don't cats swim?"), vec!["Why", "do", "n't", "cats", "swim", "?"]);
    }

    #[test]
    fn keeps_abbreviations_and_numbers() {
        assert_eq!(
            ptb("Who was president of the U.S. in 1,900?"),
            vec!["Who", "was", "president", "of", "the", "U.S.", "in", "1,900", "?"]
        );
    }

    #[test]
    fn splits_final_period_and_commas() {
        assert_eq!(
            ptb("Name a city, please."),
            vec!["Name", "a", "city", ",", "please", "."]
        );
    }

    #[test]
    fn converts_quotes() {
        assert_eq!(
            ptb(r#"What does "IBM" stand for?"#),
            vec!["What", "does", "``", "IBM", "''", "stand", "for", "?"]
        );
    }

    #[test]
    fn simple_tokenizer_splits_all_punctuation() {
        assert_eq!(
            SimpleTokenizer.tokenize("What's NATO?"),
            vec!["What", "'", "s", "NATO", "?"]
        );
    }

    #[test]
    fn kind_parses_from_str() {
        assert_eq!("PTB".parse::<TokenizerKind>().unwrap(), TokenizerKind::Ptb);
        assert_eq!("lingpipe".parse::<TokenizerKind>().unwrap(), TokenizerKind::Simple);
        assert!("bogus".parse::<TokenizerKind>().is_err());
    }
}
