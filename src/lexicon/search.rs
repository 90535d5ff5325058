//! Category resolution by hypernym search.
//!
//! A word's sense is tested against the category map; failing that, its
//! hypernyms are explored breadth first and the nearest mapped ancestor wins.
//! Only hypernym edges are followed. A visited set keeps the search finite
//! on lexicons whose hypernym relation is not acyclic.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::Serialize;

use super::{CategoryMap, Lexicon, Pos, SynsetId};

/// Separates a category label from its provenance in annotated labels.
pub const PROVENANCE_DELIMITER: &str = ":::";

/// The category label of an annotated label (`"LOCATION_CITY:::1sense[city]"`
/// → `"LOCATION_CITY"`).
pub fn strip_provenance(annotated: &str) -> &str {
    annotated
        .split_once(PROVENANCE_DELIMITER)
        .map_or(annotated, |(label, _)| label)
}

/// A successful category lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The mapped synset (the sense itself or one of its hypernyms).
    pub id: SynsetId,
    pub label: String,
    /// 1-based sense number of the word.
    pub sense: usize,
    /// Hypernym hops from the sense to `id`; 0 for a direct match.
    pub depth: usize,
    /// Lemmas of the mapped synset.
    pub lemmas: Vec<String>,
}

impl Resolution {
    pub fn category(&self) -> &str {
        &self.label
    }

    pub fn via_hypernym(&self) -> bool {
        self.depth > 0
    }

    /// The annotation after the delimiter: `2sense[lemma,lemma]`.
    pub fn provenance(&self) -> String {
        let full = self.to_string();
        full.split_once(PROVENANCE_DELIMITER)
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Resolution {
    /// `LABEL:::2sense[lemma,lemma]` or `LABEL:::1sense.hypernyms[lemma]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.via_hypernym() {
            "sense.hypernyms"
        } else {
            "sense"
        };
        write!(
            f,
            "{}{PROVENANCE_DELIMITER}{}{marker}[{}]",
            self.label,
            self.sense,
            self.lemmas.join(",")
        )
    }
}

/// Map `word` onto a category through its senses and their hypernyms.
///
/// With `all_senses` every sense is tried in order, otherwise only the first.
/// Each sense is checked directly before its hypernyms, and a sense's search
/// finishes before the next sense starts. A word with no senses for `pos` is
/// logged and yields `None`.
pub fn resolve<L: Lexicon + ?Sized>(
    lexicon: &L,
    word: &str,
    pos: Pos,
    map: &CategoryMap,
    all_senses: bool,
) -> Option<Resolution> {
    let senses = lexicon.senses(word, pos);
    if senses.is_empty() {
        tracing::warn!(word, %pos, lexicon = lexicon.name(), "unable to find word in lexicon");
        return None;
    }
    let tried = if all_senses { senses.len() } else { 1 };
    senses
        .into_iter()
        .take(tried)
        .enumerate()
        .find_map(|(i, sense)| resolve_sense(lexicon, sense, i + 1, map))
        .inspect(|r| {
            tracing::debug!(
                word,
                %pos,
                label = %r.label,
                sense = r.sense,
                depth = r.depth,
                synset = %r.id,
                "category resolved"
            );
        })
}

/// Breadth-first search from one sense along hypernym edges.
fn resolve_sense<L: Lexicon + ?Sized>(
    lexicon: &L,
    start: SynsetId,
    sense: usize,
    map: &CategoryMap,
) -> Option<Resolution> {
    let mut visited: HashSet<SynsetId> = HashSet::new();
    let mut queue: VecDeque<(SynsetId, usize)> = VecDeque::from([(start, 0)]);

    while let Some((id, depth)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(label) = map.get(id) {
            return Some(Resolution {
                id,
                label: label.to_string(),
                sense,
                depth,
                lemmas: lexicon.lemmas(id),
            });
        }
        for hypernym in lexicon.hypernyms_of(id) {
            if !visited.contains(&hypernym) {
                queue.push_back((hypernym, depth + 1));
            }
        }
    }
    None
}
