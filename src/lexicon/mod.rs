//! Lexical ontology: query interface, in-memory store, category map and
//! the searches built on them.
//!
//! ## Architecture
//!
//! - [`Lexicon`]: the query interface. Implementors provide index lookup
//!   and synset relations; synonyms, common hypernyms, hyponym closure,
//!   glosses and the compound word test are derived from those.
//! - [`memory::MemoryLexicon`]: a petgraph-backed WordNet-style store loaded
//!   from JSON.
//! - [`category_map::CategoryMap`]: synset id → question category label.
//! - [`search`]: hypernym breadth-first search against a category map.
//! - [`compound::CompoundWordExtractor`]: extends a headword to a compound
//!   the lexicon knows.

pub mod category_map;
pub mod compound;
pub mod error;
pub mod memory;
pub mod morphy;
pub mod search;

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use category_map::CategoryMap;
pub use compound::CompoundWordExtractor;
pub use error::{CategoryMapError, CategoryMapResult, LexiconError, LexiconResult};
pub use memory::{LexiconBuilder, MemoryLexicon};
pub use search::{Resolution, resolve};

/// Part of speech of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    /// Map a Penn Treebank tag to a lexicon part of speech.
    ///
    /// `NN*` → noun, `VB*`/`MD` → verb, `JJ*`/`CD` → adjective,
    /// `RB*`/`RP`/`WRB` → adverb. Anything else has no lexicon entry.
    pub fn from_penn_tag(tag: &str) -> Option<Pos> {
        if tag.starts_with("NN") {
            Some(Pos::Noun)
        } else if tag.starts_with("VB") || tag == "MD" {
            Some(Pos::Verb)
        } else if tag.starts_with("JJ") || tag == "CD" {
            Some(Pos::Adjective)
        } else if tag.starts_with("RB") || tag == "RP" || tag == "WRB" {
            Some(Pos::Adverb)
        } else {
            None
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adjective => "adjective",
            Pos::Adverb => "adverb",
        };
        f.write_str(s)
    }
}

impl FromStr for Pos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "noun" => Ok(Pos::Noun),
            "v" | "verb" => Ok(Pos::Verb),
            "a" | "s" | "adj" | "adjective" => Ok(Pos::Adjective),
            "r" | "adv" | "adverb" => Ok(Pos::Adverb),
            other => Err(format!("unknown part of speech \"{other}\"")),
        }
    }
}

/// Synset identifier (a WordNet data file offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynsetId(pub u64);

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

/// Read access to a lexical ontology.
///
/// Words are looked up case-insensitively; multi-word expressions may use
/// spaces or underscores. Lemmas come back in the lexicon's own form
/// (underscores for spaces).
pub trait Lexicon: Send + Sync {
    /// Display name of the resource ("WordNet 3.0").
    fn name(&self) -> &str;

    /// The index lemma `word` resolves to for `pos`, with spaces between
    /// components. Base-form reduction may apply.
    fn index_lemma(&self, word: &str, pos: Pos) -> Option<String>;

    /// Senses of `word`, most frequent first. Empty when not indexed.
    fn senses(&self, word: &str, pos: Pos) -> Vec<SynsetId>;

    /// Direct hypernyms of a synset, in definition order.
    fn hypernyms_of(&self, id: SynsetId) -> Vec<SynsetId>;

    /// Direct hyponyms of a synset.
    fn hyponyms_of(&self, id: SynsetId) -> Vec<SynsetId>;

    /// Member lemmas of a synset.
    fn lemmas(&self, id: SynsetId) -> Vec<String>;

    fn gloss_of(&self, id: SynsetId) -> Option<String>;

    /// The most frequent sense of `word`.
    fn first_sense(&self, word: &str, pos: Pos) -> Option<SynsetId> {
        self.senses(word, pos).first().copied()
    }

    /// Whether `phrase` is a noun in the lexicon.
    ///
    /// Base-form reduction can drop components of a collocation ("real
    /// birthday" → "real"), so the found lemma must have as many spaces as
    /// the phrase.
    fn contains_word(&self, phrase: &str) -> bool {
        self.index_lemma(phrase, Pos::Noun)
            .is_some_and(|lemma| count_whitespace(&lemma) == count_whitespace(phrase))
    }

    /// Lemmas of every sense of `word`, for one part of speech or all.
    fn synonyms(&self, word: &str, pos: Option<Pos>) -> Vec<String> {
        if word.trim().is_empty() {
            return Vec::new();
        }
        let parts: &[Pos] = match &pos {
            Some(p) => std::slice::from_ref(p),
            None => &Pos::ALL,
        };
        parts
            .iter()
            .flat_map(|&p| self.senses(word, p))
            .flat_map(|id| self.lemmas(id))
            .collect()
    }

    /// Lemmas shared by the hypernym closures of the first noun sense of
    /// every word. Words missing from the lexicon are skipped.
    fn common_hypernyms(&self, words: &[&str]) -> BTreeSet<String> {
        let mut overlap: Option<BTreeSet<String>> = None;
        for word in words {
            let Some(first) = self.first_sense(word, Pos::Noun) else {
                continue;
            };
            let current: BTreeSet<String> = self
                .hypernym_closure(first)
                .into_iter()
                .flat_map(|id| self.lemmas(id))
                .collect();
            overlap = Some(match overlap {
                None => current,
                Some(prev) => prev.intersection(&current).cloned().collect(),
            });
        }
        overlap.unwrap_or_default()
    }

    /// Every synset reachable over hypernym edges, nearest first. The start
    /// synset is not included.
    fn hypernym_closure(&self, start: SynsetId) -> Vec<SynsetId> {
        let mut visited: HashSet<SynsetId> = HashSet::from([start]);
        let mut queue: VecDeque<SynsetId> = self.hypernyms_of(start).into();
        let mut out = Vec::new();
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            out.push(id);
            queue.extend(self.hypernyms_of(id));
        }
        out
    }

    /// Lemmas of the hyponyms of the first noun sense of `word`, breadth
    /// first, with spaces instead of underscores.
    ///
    /// Direct hyponyms are level 0; levels below `max_depth` are included.
    fn hyponyms(&self, word: &str, max_depth: usize) -> Vec<String> {
        let Some(first) = self.first_sense(word, Pos::Noun) else {
            return Vec::new();
        };
        let mut visited: HashSet<SynsetId> = HashSet::from([first]);
        let mut queue: VecDeque<(SynsetId, usize)> =
            self.hyponyms_of(first).into_iter().map(|id| (id, 0)).collect();
        let mut out = Vec::new();
        while let Some((id, depth)) = queue.pop_front() {
            if depth >= max_depth || !visited.insert(id) {
                continue;
            }
            out.extend(self.lemmas(id).into_iter().map(|l| l.replace('_', " ")));
            queue.extend(self.hyponyms_of(id).into_iter().map(|h| (h, depth + 1)));
        }
        out
    }

    /// Gloss of the first noun sense, empty when unknown.
    fn gloss(&self, word: &str) -> String {
        self.first_sense(word, Pos::Noun)
            .and_then(|id| self.gloss_of(id))
            .unwrap_or_default()
    }
}

fn count_whitespace(s: &str) -> usize {
    s.chars().filter(|c| c.is_whitespace()).count()
}

/// Lowercase, trim, and join whitespace-separated components with `_`.
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> MemoryLexicon {
        LexiconBuilder::new("test")
            .synset(1, Pos::Noun, &["entity"], &[])
            .synset(2, Pos::Noun, &["organism", "being"], &[1])
            .synset(3, Pos::Noun, &["animal", "beast"], &[2])
            .synset(4, Pos::Noun, &["dog", "domestic_dog"], &[3])
            .synset(5, Pos::Noun, &["cat", "true_cat"], &[3])
            .synset(6, Pos::Noun, &["puppy"], &[4])
            .synset(7, Pos::Verb, &["dog", "chase"], &[])
            .synset(8, Pos::Noun, &["real_birthday_party"], &[])
            .gloss(4, "a member of the genus Canis")
            .build()
            .unwrap()
    }

    #[test]
    fn penn_tags_map_to_pos() {
        assert_eq!(Pos::from_penn_tag("NNS"), Some(Pos::Noun));
        assert_eq!(Pos::from_penn_tag("MD"), Some(Pos::Verb));
        assert_eq!(Pos::from_penn_tag("CD"), Some(Pos::Adjective));
        assert_eq!(Pos::from_penn_tag("WRB"), Some(Pos::Adverb));
        assert_eq!(Pos::from_penn_tag("WP"), None);
        assert_eq!(Pos::from_penn_tag("DT"), None);
    }

    #[test]
    fn pos_parses_wordnet_letters() {
        assert_eq!("n".parse::<Pos>().unwrap(), Pos::Noun);
        assert_eq!("Adverb".parse::<Pos>().unwrap(), Pos::Adverb);
        assert!("x".parse::<Pos>().is_err());
    }

    #[test]
    fn synonyms_across_parts_of_speech() {
        let lex = animals();
        assert_eq!(lex.synonyms("dog", Some(Pos::Noun)), vec!["dog", "domestic_dog"]);
        assert_eq!(
            lex.synonyms("dog", None),
            vec!["dog", "domestic_dog", "dog", "chase"]
        );
        assert!(lex.synonyms("", None).is_empty());
    }

    #[test]
    fn common_hypernyms_of_siblings() {
        let lex = animals();
        let common = lex.common_hypernyms(&["dog", "cat", "unicorn"]);
        let expected: BTreeSet<String> = ["animal", "beast", "organism", "being", "entity"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(common, expected);
    }

    #[test]
    fn hyponyms_respect_depth() {
        let lex = animals();
        let mut direct = lex.hyponyms("animal", 1);
        direct.sort();
        assert_eq!(direct, vec!["cat", "dog", "domestic dog", "true cat"]);
        assert!(lex.hyponyms("animal", 2).contains(&"puppy".to_string()));
        assert!(lex.hyponyms("animal", 0).is_empty());
    }

    #[test]
    fn gloss_of_first_noun_sense() {
        let lex = animals();
        assert_eq!(lex.gloss("dog"), "a member of the genus Canis");
        assert_eq!(lex.gloss("unicorn"), "");
    }

    #[test]
    fn contains_word_counts_components() {
        let lex = animals();
        assert!(lex.contains_word("domestic dog"));
        assert!(lex.contains_word("Dogs"));
        assert!(!lex.contains_word("real birthday"));
        assert!(!lex.contains_word("unicorn"));
    }

    #[test]
    fn normalizes_words() {
        assert_eq!(normalize_word("  Domestic   Dog "), "domestic_dog");
    }
}
