//! Question head finder.
//!
//! A Collins-style head finder driven by a [`HeadRuleTable`], with named
//! per-category overrides consulted before the table. The overrides move the
//! head onto the noun being asked about:
//!
//! - `SBARQ`: descend into the wh-phrase when it has more than one child
//!   ("What *country* ...").
//! - `WHNP`: "Which of the following *actors*" and possessives
//!   ("What *country*'s capital").
//! - `NP`: a trailing wh-attachment ("an imitation of which *animal*").
//!
//! After a rule picks a child, a postfix fix-up moves the head from cue nouns
//! such as *kind*, *type* or *name* onto a following `of`/`for` phrase, so
//! "kind of animal" is headed by *animal*.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::head_rules::{Direction, HeadRule, HeadRuleTable};
use super::tree::Tree;

/// A category-specific head selection tried before the table rules.
///
/// Returning `None` falls through to the table.
pub type HeadOverride = for<'t> fn(&HeadFinder, &'t Tree) -> Option<&'t Tree>;

/// Cue nouns whose head moves onto a following `of`/`for` phrase.
static POSTFIX_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:name|kind|type|part|genre|group)s?|famil(?:y|ies))$").unwrap()
});

static POSTFIX_PREPOSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:for|of)$").unwrap());

static WH_PHRASE: LazyLock<HeadRule> = LazyLock::new(|| {
    HeadRule::new(Direction::Left, &["WHNP", "WHADJP", "WHPP", "WHADVP"])
});
static NOUN_PHRASE_DIS: LazyLock<HeadRule> =
    LazyLock::new(|| HeadRule::new(Direction::LeftDis, &["NP", "WHNP"]));
static NP_LEFT: LazyLock<HeadRule> = LazyLock::new(|| HeadRule::new(Direction::Left, &["NP"]));
static WHPP_RIGHT: LazyLock<HeadRule> =
    LazyLock::new(|| HeadRule::new(Direction::Right, &["WHPP"]));
static WHNP_LEFT: LazyLock<HeadRule> =
    LazyLock::new(|| HeadRule::new(Direction::Left, &["WHNP"]));
static NOUN_RIGHT_DIS: LazyLock<HeadRule> = LazyLock::new(|| {
    HeadRule::new(Direction::RightDis, &["NP", "NN", "NNP", "NNPS", "NNS"])
});

/// Table-driven head finder with per-category overrides.
#[derive(Clone)]
pub struct HeadFinder {
    table: HeadRuleTable,
    overrides: HashMap<String, HeadOverride>,
}

impl std::fmt::Debug for HeadFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        overridden.sort_unstable();
        f.debug_struct("HeadFinder")
            .field("rule_categories", &self.table.len())
            .field("overrides", &overridden)
            .finish()
    }
}

impl HeadFinder {
    /// A plain table-driven finder without overrides.
    pub fn new(table: HeadRuleTable) -> Self {
        Self {
            table,
            overrides: HashMap::new(),
        }
    }

    /// The question head finder: question rule table plus the wh-overrides.
    pub fn question() -> Self {
        Self::new(HeadRuleTable::question())
            .with_override("SBARQ", wh_question_head)
            .with_override("WHNP", wh_noun_phrase_head)
            .with_override("NP", wh_attachment_head)
    }

    /// Register (or replace) the override for a category.
    pub fn with_override(mut self, category: impl Into<String>, f: HeadOverride) -> Self {
        self.overrides.insert(category.into(), f);
        self
    }

    pub fn table(&self) -> &HeadRuleTable {
        &self.table
    }

    /// The head daughter of `t`, or `None` for a leaf.
    ///
    /// Unary nodes are headed by their only child. Overrides only apply to
    /// nodes with two or more children.
    pub fn determine_head<'t>(&self, t: &'t Tree) -> Option<&'t Tree> {
        match t.children() {
            [] => None,
            [only] => Some(only),
            _ => Some(self.non_trivial_head(t)),
        }
    }

    fn non_trivial_head<'t>(&self, t: &'t Tree) -> &'t Tree {
        let category = t.basic_category();
        let kids = t.children();

        if let Some(f) = self.overrides.get(category) {
            if let Some(head) = f(self, t) {
                tracing::trace!(category, head = head.label(), "head override applied");
                return head;
            }
        }

        let Some(rules) = self.table.get(category) else {
            tracing::debug!(category, "no head rule, defaulting to leftmost child");
            return &kids[0];
        };

        let last = rules.len().saturating_sub(1);
        for (i, rule) in rules.iter().enumerate() {
            if let Some(head) = self.locate(kids, rule, i == last) {
                return head;
            }
        }
        // Only reachable with an empty rule list.
        &kids[0]
    }

    /// Apply one rule to a list of daughters.
    ///
    /// On a hit the postfix fix-up runs. On a miss with `last_resort` the
    /// leftmost or rightmost daughter (per the rule's direction) is returned
    /// without fix-up.
    pub fn locate<'t>(
        &self,
        kids: &'t [Tree],
        rule: &HeadRule,
        last_resort: bool,
    ) -> Option<&'t Tree> {
        if kids.is_empty() {
            return None;
        }
        let categories: Vec<&str> = kids.iter().map(|k| k.basic_category()).collect();
        match rule.locate(&categories) {
            Some(idx) => Some(&kids[postfix_fix(idx, kids)]),
            None if last_resort => {
                if rule.direction.defaults_left() {
                    kids.first()
                } else {
                    kids.last()
                }
            }
            None => None,
        }
    }

    /// Follow head daughters down to a terminal.
    pub fn head_terminal<'t>(&self, t: &'t Tree) -> &'t Tree {
        let mut node = t;
        while let Some(head) = self.determine_head(node) {
            node = head;
        }
        node
    }

    /// Follow head daughters down to the preterminal (tag node) above the
    /// head word. `None` when called on a bare leaf.
    pub fn head_preterminal<'t>(&self, t: &'t Tree) -> Option<&'t Tree> {
        let mut node = t;
        loop {
            if node.is_preterminal() {
                return Some(node);
            }
            node = self.determine_head(node)?;
        }
    }
}

impl Default for HeadFinder {
    fn default() -> Self {
        Self::question()
    }
}

/// Shift the head from a cue noun onto the following `of`/`for` phrase.
fn postfix_fix(idx: usize, kids: &[Tree]) -> usize {
    let Some(next) = kids.get(idx + 1) else {
        return idx;
    };
    let daughter = &kids[idx];
    if !matches!(daughter.label(), "NP" | "NN" | "NNS" | "WHNP") {
        return idx;
    }
    let Some(last) = daughter.children().last() else {
        return idx;
    };
    // (NN kind) or (NP the (NN name))
    if !(daughter.is_preterminal() || last.is_preterminal()) {
        return idx;
    }
    if !POSTFIX_WORD.is_match(last.first_terminal().label()) || next.label() != "PP" {
        return idx;
    }
    // "(PP (IN in) ...)" keeps the cue noun; only of/for move the head.
    match next.children() {
        [prep, _, ..]
            if prep.label() == "IN"
                && POSTFIX_PREPOSITION.is_match(prep.first_terminal().label()) =>
        {
            idx + 1
        }
        _ => idx,
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// `(SBARQ (WHNP What country) (SQ ...))` → the wh-phrase.
fn wh_question_head<'t>(finder: &HeadFinder, t: &'t Tree) -> Option<&'t Tree> {
    finder
        .locate(t.children(), &WH_PHRASE, false)
        .filter(|wh| wh.children().len() > 1)
}

/// Trivia-style and possessive wh-noun-phrases.
fn wh_noun_phrase_head<'t>(finder: &HeadFinder, t: &'t Tree) -> Option<&'t Tree> {
    let kids = t.children();
    let first = kids.first()?;
    // (WHNP (WHNP (WDT Which)) (PP of the following actors))
    if first.label() == "WHNP" && first.children().len() == 1 && kids.len() > 1 {
        return Some(&kids[1]);
    }
    // (WHNP (WHNP What (NP (NN country) (POS 's))) (NN capital))
    let phrase = finder.locate(kids, &NOUN_PHRASE_DIS, false)?;
    if phrase.children().len() > 1 {
        let nested = finder.locate(phrase.children(), &NP_LEFT, false)?;
        if nested.children().last().map(Tree::label) == Some("POS") {
            return Some(nested);
        }
    }
    None
}

/// `(NP (NP an imitation) (WHPP (IN of) (WHNP which (NN animal))))` → animal.
fn wh_attachment_head<'t>(finder: &HeadFinder, t: &'t Tree) -> Option<&'t Tree> {
    let kids = t.children();
    if kids.len() < 2 {
        return None;
    }
    let whpp = finder.locate(kids, &WHPP_RIGHT, false)?;
    match whpp.children() {
        [prep, _, ..] if prep.label() == "IN" => {}
        _ => return None,
    }
    let whnp = finder.locate(whpp.children(), &WHNP_LEFT, false)?;
    if whnp.children().len() < 2 {
        return None;
    }
    finder.locate(whnp.children(), &NOUN_RIGHT_DIS, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(s: &str) -> Tree {
        s.parse().unwrap()
    }

    fn head_word(s: &str) -> String {
        let finder = HeadFinder::question();
        let t = tree(s);
        finder.head_terminal(&t).label().to_string()
    }

    #[test]
    fn leaf_is_its_own_head() {
        let finder = HeadFinder::question();
        let leaf = Tree::leaf("dog");
        assert_eq!(finder.head_terminal(&leaf).label(), "dog");
        assert!(finder.determine_head(&leaf).is_none());
        assert!(finder.head_preterminal(&leaf).is_none());
    }

    #[test]
    fn wh_determiner_question_heads_on_noun() {
        let s = "(ROOT (SBARQ (WHNP (WDT What) (NN country)) \
                 (SQ (VBZ is) (ADJP (RB very) (ADJP (JJ big) (PP (IN in) (NP (NNP Europe)))))) (. ?)))";
        assert_eq!(head_word(s), "country");
    }

    #[test]
    fn copular_question_heads_on_subject_noun() {
        let s = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN capital)) \
                 (PP (IN of) (NP (NNP France))))) (. ?)))";
        assert_eq!(head_word(s), "capital");
        let finder = HeadFinder::question();
        let t = tree(s);
        assert_eq!(finder.head_preterminal(&t).unwrap().label(), "NN");
    }

    #[test]
    fn kind_of_moves_head_to_complement() {
        let s = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT a) (NN kind)) \
                 (PP (IN of) (NP (NN animal))))) (. ?)))";
        assert_eq!(head_word(s), "animal");
    }

    #[test]
    fn name_in_keeps_cue_noun() {
        let s = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (JJS longest) (NN name)) \
                 (PP (IN in) (NP (DT the) (NNP U.S.))))) (. ?)))";
        assert_eq!(head_word(s), "name");
    }

    #[test]
    fn possessive_wh_phrase_heads_on_owner() {
        let s = "(ROOT (SBARQ (WHNP (WHNP (WDT What) (NP (NN country) (POS 's))) (NN capital)) \
                 (SQ (VBZ is) (NP (NNP Lisbon))) (. ?)))";
        assert_eq!(head_word(s), "country");
    }

    #[test]
    fn which_of_the_following() {
        let s = "(ROOT (SBARQ (WHNP (WHNP (WDT Which)) (PP (IN of) (NP (DT the) (JJ following) (NNS actors)))) \
                 (SQ (VBD played) (NP (NNP Batman))) (. ?)))";
        assert_eq!(head_word(s), "actors");
    }

    #[test]
    fn trailing_wh_attachment() {
        let s = "(ROOT (S (NP (NNP Pooh)) (VP (VBZ is) (NP (NP (DT an) (NN imitation)) \
                 (WHPP (IN of) (WHNP (WDT which) (NN animal))))) (. ?)))";
        assert_eq!(head_word(s), "animal");
    }

    #[test]
    fn how_adverb_phrase() {
        let s = "(ROOT (SBARQ (WHADVP (WRB How) (RB long)) (SQ (VBZ is) (NP (DT the) (NNP Nile))) (. ?)))";
        assert_eq!(head_word(s), "long");
    }

    #[test]
    fn single_noun_wh_phrase_ignores_deep_siblings() {
        let s = "(ROOT (SBARQ (WHNP (WDT What) (NN dog)) (SQ (VBZ is) (ADJP (RB most) \
                 (ADJP (JJ loyal) (PP (IN to) (NP (NP (PRP$ its) (NNS owners)) (PP (IN in) (NP (NNP Japan)))))))) (. ?)))";
        assert_eq!(head_word(s), "dog");
    }

    #[test]
    fn unknown_category_defaults_leftmost() {
        let finder = HeadFinder::question();
        let t = tree("(ZZZ (NN first) (NN second))");
        assert_eq!(finder.head_terminal(&t).label(), "first");
    }

    #[test]
    fn empty_rule_defaults_by_direction() {
        let finder = HeadFinder::question();
        let t = tree("(INTJ (UH oh) (UH well))");
        assert_eq!(finder.head_terminal(&t).label(), "oh");
    }

    #[test]
    fn custom_override_takes_precedence() {
        fn last_child<'t>(_: &HeadFinder, t: &'t Tree) -> Option<&'t Tree> {
            t.children().last()
        }
        let finder = HeadFinder::question().with_override("ZZZ", last_child);
        let t = tree("(ZZZ (NN first) (NN second))");
        assert_eq!(finder.head_terminal(&t).label(), "second");
    }
}
