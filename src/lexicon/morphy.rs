//! Base-form reduction for index lookup.
//!
//! WordNet-style detachment rules: strip an inflectional suffix and append a
//! replacement (`ies` → `y`, `ches` → `ch`, `ing` → `e`, ...), plus a short
//! table of irregular nouns. Candidates are produced in rule order and the
//! lexicon takes the first one it indexes.

use super::Pos;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("lice", "louse"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

fn rules(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => NOUN_RULES,
        Pos::Verb => VERB_RULES,
        Pos::Adjective => ADJECTIVE_RULES,
        Pos::Adverb => &[],
    }
}

/// Candidate base forms of an already normalized (lowercase, `_`-joined)
/// word, most likely first. The word itself is not included.
///
/// For collocations the rules apply to the last component, so
/// `prime_ministers` reduces to `prime_minister`.
pub fn base_forms(word: &str, pos: Pos) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let (prefix, last) = match word.rfind('_') {
        Some(i) => word.split_at(i + 1),
        None => ("", word),
    };

    if pos == Pos::Noun {
        if let Some((_, base)) = IRREGULAR_NOUNS.iter().find(|(form, _)| *form == last) {
            out.push(format!("{prefix}{base}"));
        }
        // "glass" and "bus" are not plurals.
        if last.ends_with("ss") || last.ends_with("us") {
            return out;
        }
    }

    for (suffix, replacement) in rules(pos) {
        let Some(stem) = last.strip_suffix(suffix) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }
        let candidate = format!("{prefix}{stem}{replacement}");
        if candidate != word && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}
