//! The per-question analysis record.
//!
//! An [`AnalyzedQuestion`] is filled in stages: tokens, then tags, then the
//! parse tree, then focus and category. Each setter checks the stage before
//! it, so a tree can never disagree with the tokens it was parsed from.

use serde::Serialize;

use super::error::{AnalysisError, AnalysisResult};
use crate::syntax::Tree;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzedQuestion {
    text: String,
    tokens: Vec<String>,
    pos_tags: Vec<String>,
    #[serde(skip)]
    parse_tree: Option<Tree>,
    parse_tree_string: Option<String>,
    headword: Option<String>,
    headword_synonyms: Vec<String>,
    compound_headword: Option<String>,
    /// Category label without provenance.
    headword_category: Option<String>,
    /// Term extracted by a pattern: the acronym to expand, the term to
    /// define, the counted noun.
    target_word: Option<String>,
    extraction_trace: String,
}

impl AnalyzedQuestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn pos_tags(&self) -> &[String] {
        &self.pos_tags
    }

    pub fn parse_tree(&self) -> Option<&Tree> {
        self.parse_tree.as_ref()
    }

    /// Canonical bracketed form of the parse tree.
    pub fn parse_tree_string(&self) -> Option<&str> {
        self.parse_tree_string.as_deref()
    }

    pub fn headword(&self) -> Option<&str> {
        self.headword.as_deref()
    }

    pub fn headword_synonyms(&self) -> &[String] {
        &self.headword_synonyms
    }

    pub fn compound_headword(&self) -> Option<&str> {
        self.compound_headword.as_deref()
    }

    pub fn headword_category(&self) -> Option<&str> {
        self.headword_category.as_deref()
    }

    pub fn target_word(&self) -> Option<&str> {
        self.target_word.as_deref()
    }

    pub fn extraction_trace(&self) -> &str {
        &self.extraction_trace
    }

    /// Replace the tokens. Tags and tree from an earlier tokenization are
    /// dropped.
    pub fn set_tokens(&mut self, tokens: Vec<String>) {
        self.tokens = tokens;
        self.pos_tags.clear();
        self.parse_tree = None;
        self.parse_tree_string = None;
    }

    pub fn set_pos_tags(&mut self, tags: Vec<String>) -> AnalysisResult<()> {
        if self.tokens.is_empty() {
            return Err(AnalysisError::TagsWithoutTokens);
        }
        if tags.len() != self.tokens.len() {
            return Err(AnalysisError::TagCountMismatch {
                tokens: self.tokens.len(),
                tags: tags.len(),
            });
        }
        self.pos_tags = tags;
        Ok(())
    }

    /// Set the parse tree; its leaf yield must equal the tokens.
    pub fn set_parse_tree(&mut self, tree: Tree) -> AnalysisResult<()> {
        if self.tokens.is_empty() || self.pos_tags.is_empty() {
            return Err(AnalysisError::TreeWithoutTags);
        }
        let found = tree.yield_words();
        if found != self.tokens {
            return Err(AnalysisError::TreeYieldMismatch {
                expected: self.tokens.join(" "),
                found: found.join(" "),
            });
        }
        self.parse_tree_string = Some(tree.to_string());
        self.parse_tree = Some(tree);
        Ok(())
    }

    pub fn set_headword(&mut self, headword: impl Into<String>) {
        self.headword = Some(headword.into());
    }

    pub fn set_headword_synonyms(&mut self, synonyms: Vec<String>) {
        self.headword_synonyms = synonyms;
    }

    pub fn set_compound_headword(&mut self, compound: impl Into<String>) {
        self.compound_headword = Some(compound.into());
    }

    pub fn set_headword_category(&mut self, category: impl Into<String>) {
        self.headword_category = Some(category.into());
    }

    pub fn set_target_word(&mut self, word: impl Into<String>) {
        self.target_word = Some(word.into());
    }

    pub fn set_extraction_trace(&mut self, trace: impl Into<String>) {
        self.extraction_trace = trace.into();
    }

    pub fn append_trace(&mut self, more: &str) {
        self.extraction_trace.push_str(more);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    const TREE: &str = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT a) (NN cat))) (. ?)))";

    #[test]
    fn stages_in_order() {
        let mut q = AnalyzedQuestion::new("What is a cat?");
        q.set_tokens(strs("What is a cat ?"));
        q.set_pos_tags(strs("WP VBZ DT NN .")).unwrap();
        q.set_parse_tree(TREE.parse().unwrap()).unwrap();
        assert_eq!(q.parse_tree_string(), Some(TREE));
    }

    #[test]
    fn tags_need_tokens() {
        let mut q = AnalyzedQuestion::new("What is a cat?");
        assert!(matches!(
            q.set_pos_tags(strs("WP")),
            Err(AnalysisError::TagsWithoutTokens)
        ));
        q.set_tokens(strs("What is a cat ?"));
        assert!(matches!(
            q.set_pos_tags(strs("WP VBZ")),
            Err(AnalysisError::TagCountMismatch { tokens: 5, tags: 2 })
        ));
    }

    #[test]
    fn tree_must_match_tokens() {
        let mut q = AnalyzedQuestion::new("What is a dog?");
        assert!(matches!(
            q.set_parse_tree(TREE.parse().unwrap()),
            Err(AnalysisError::TreeWithoutTags)
        ));
        q.set_tokens(strs("What is a dog ?"));
        q.set_pos_tags(strs("WP VBZ DT NN .")).unwrap();
        assert!(matches!(
            q.set_parse_tree(TREE.parse().unwrap()),
            Err(AnalysisError::TreeYieldMismatch { .. })
        ));
        assert!(q.parse_tree().is_none());
    }

    #[test]
    fn retokenizing_drops_later_stages() {
        let mut q = AnalyzedQuestion::new("What is a cat?");
        q.set_tokens(strs("What is a cat ?"));
        q.set_pos_tags(strs("WP VBZ DT NN .")).unwrap();
        q.set_tokens(strs("What is a cat?"));
        assert!(q.pos_tags().is_empty());
    }

    #[test]
    fn serializes_without_tree_object() {
        let mut q = AnalyzedQuestion::new("What is a cat?");
        q.set_tokens(strs("What is a cat ?"));
        q.set_pos_tags(strs("WP VBZ DT NN .")).unwrap();
        q.set_parse_tree(TREE.parse().unwrap()).unwrap();
        q.set_headword("cat");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["headword"], "cat");
        assert_eq!(json["parse_tree_string"], TREE);
        assert!(json.get("parse_tree").is_none());
    }
}
