//! Question focus extraction.
//!
//! The focus is either a category placeholder from the pattern cascade or a
//! headword found syntactically: the head preterminal of the parse tree when
//! it is a noun or a wh-pronoun, otherwise the first plain noun. The
//! headword is then extended to a compound known to the lexicon.

use std::sync::LazyLock;

use regex::Regex;

use super::AnalyzedQuestion;
use super::category::QuestionCategory;
use super::patterns::PatternCascade;
use crate::lexicon::{CompoundWordExtractor, Lexicon};
use crate::syntax::HeadFinder;

static HEADWORD_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:NNP?S?|WP)$").unwrap());

/// What a question is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// The cascade classified the question outright.
    Placeholder(QuestionCategory),
    Headword(String),
    /// Neither a placeholder nor a headword was found.
    Missing,
}

impl Focus {
    pub fn headword(&self) -> Option<&str> {
        match self {
            Focus::Headword(h) => Some(h),
            _ => None,
        }
    }
}

/// Runs the cascade, then head finding and compound extension.
#[derive(Debug, Clone, Default)]
pub struct FocusExtractor {
    head_finder: HeadFinder,
    cascade: PatternCascade,
}

impl FocusExtractor {
    pub fn new(head_finder: HeadFinder, cascade: PatternCascade) -> Self {
        Self {
            head_finder,
            cascade,
        }
    }

    /// Question head rules with the English cascade.
    pub fn english() -> Self {
        Self::new(HeadFinder::question(), PatternCascade::english())
    }

    pub fn cascade(&self) -> &PatternCascade {
        &self.cascade
    }

    pub fn head_finder(&self) -> &HeadFinder {
        &self.head_finder
    }

    /// Find the focus of `question`.
    ///
    /// Records the cascade's target word, the headword, the compound
    /// headword and a short trace of the heuristic used on `question`.
    pub fn extract(&self, question: &mut AnalyzedQuestion, lexicon: &dyn Lexicon) -> Focus {
        if let Some(m) = self.cascade.find_question(question) {
            if let Some(target) = m.target {
                question.set_target_word(target);
            }
            if let Some(category) = m.category {
                return Focus::Placeholder(category);
            }
        }

        let Some(tree) = question.parse_tree() else {
            tracing::debug!(question = question.text(), "no parse tree, headword unavailable");
            question.set_extraction_trace("no headword");
            return Focus::Missing;
        };
        if tree.is_degenerate() {
            tracing::warn!(question = question.text(), tree = %tree, "degenerate parse tree");
            question.set_extraction_trace("no headword");
            return Focus::Missing;
        }

        let from_head = self
            .head_finder
            .head_preterminal(tree)
            .filter(|pt| HEADWORD_TAGS.is_match(pt.label()))
            .map(|pt| pt.first_terminal().label().to_string());
        let headword = from_head.or_else(|| {
            question
                .pos_tags()
                .iter()
                .position(|t| t == "NN")
                .map(|i| question.tokens()[i].clone())
        });

        let Some(headword) = headword else {
            tracing::debug!(question = question.text(), "no headword");
            question.set_extraction_trace("no headword");
            return Focus::Missing;
        };

        let compound = CompoundWordExtractor::new(lexicon).extract(
            question.tokens(),
            question.pos_tags(),
            &headword,
        );
        if compound != headword {
            question.set_extraction_trace(format!("compound ({headword},{compound})"));
            question.set_compound_headword(compound);
        } else {
            question.set_extraction_trace(format!("single ({headword})"));
        }
        tracing::debug!(headword = %headword, trace = question.extraction_trace(), "headword found");
        question.set_headword(headword.as_str());
        Focus::Headword(headword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LexiconBuilder, MemoryLexicon, Pos};
    use crate::syntax::Tree;

    fn lexicon() -> MemoryLexicon {
        LexiconBuilder::new("test")
            .synset(1, Pos::Noun, &["capital"], &[])
            .synset(2, Pos::Noun, &["capital_of_France"], &[])
            .synset(3, Pos::Noun, &["dog"], &[])
            .build()
            .unwrap()
    }

    fn question(text: &str, tree: &str) -> AnalyzedQuestion {
        let tree: Tree = tree.parse().unwrap();
        let mut q = AnalyzedQuestion::new(text);
        q.set_tokens(tree.yield_words());
        q.set_pos_tags(tree.preterminal_yield()).unwrap();
        q.set_parse_tree(tree).unwrap();
        q
    }

    #[test]
    fn placeholder_skips_head_finding() {
        let mut q = question(
            "What does NATO stand for?",
            "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ does) (NP (NNP NATO)) (VP (VB stand) (PP (IN for)))) (. ?)))",
        );
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus, Focus::Placeholder(QuestionCategory::AbbreviationExpansion));
        assert_eq!(q.target_word(), Some("NATO"));
        assert_eq!(q.headword(), None);
    }

    #[test]
    fn compound_headword() {
        let mut q = question(
            "What is the capital of France?",
            "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN capital)) (PP (IN of) (NP (NNP France))))) (. ?)))",
        );
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus.headword(), Some("capital"));
        assert_eq!(q.compound_headword(), Some("capital of France"));
        assert_eq!(q.extraction_trace(), "compound (capital,capital of France)");
    }

    #[test]
    fn single_headword() {
        let mut q = question(
            "What is the capital of Spain?",
            "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN capital)) (PP (IN of) (NP (NNP Spain))))) (. ?)))",
        );
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus, Focus::Headword("capital".into()));
        assert_eq!(q.compound_headword(), None);
        assert_eq!(q.extraction_trace(), "single (capital)");
    }

    #[test]
    fn falls_back_to_first_plain_noun() {
        // Head is the verb "bark"; the first NN is "dog".
        let mut q = question(
            "Name the dog bark .",
            "(ROOT (S (VP (VB Name) (S (NP (DT the) (NN dog)) (VP (VB bark)))) (. .)))",
        );
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus.headword(), Some("dog"));
        assert_eq!(q.extraction_trace(), "single (dog)");
    }

    #[test]
    fn degenerate_tree_has_no_headword() {
        let mut q = AnalyzedQuestion::new("What is");
        q.set_tokens(vec!["What".into(), "is".into()]);
        q.set_pos_tags(vec!["WP".into(), "VBZ".into()]).unwrap();
        q.set_parse_tree("(ROOT What is)".parse().unwrap()).unwrap();
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus, Focus::Missing);
        assert_eq!(q.extraction_trace(), "no headword");
        assert_eq!(q.headword(), None);
    }

    #[test]
    fn missing_tree_has_no_headword() {
        let mut q = AnalyzedQuestion::new("Name a dog breed.");
        q.set_tokens(vec!["Name".into(), "a".into(), "dog".into(), "breed".into(), ".".into()]);
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(focus, Focus::Missing);
    }

    #[test]
    fn deferred_rule_keeps_target_and_continues() {
        let mut q = question(
            "What is the abbreviation for dog ?",
            "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN abbreviation)) (PP (IN for) (NP (NN dog))))) (. ?)))",
        );
        let focus = FocusExtractor::english().extract(&mut q, &lexicon());
        assert_eq!(q.target_word(), Some("dog"));
        assert_eq!(focus.headword(), Some("abbreviation"));
    }
}
