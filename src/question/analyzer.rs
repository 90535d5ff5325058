//! End-to-end question analysis.
//!
//! [`QuestionAnalyzer`] wires the collaborators together. It tokenizes,
//! parses, reads the tags off the tree, extracts the focus, and maps the
//! headword onto a category through the lexicon.

use std::sync::Arc;

use rayon::prelude::*;

use super::AnalyzedQuestion;
use super::category::{LabelSet, QuestionCategory};
use super::focus::{Focus, FocusExtractor};
use super::rules::RulesClassifier;
use crate::config::AnalyzerConfig;
use crate::error::QfocusResult;
use crate::lexicon::search::PROVENANCE_DELIMITER;
use crate::lexicon::{CategoryMap, Lexicon, MemoryLexicon, Pos, Resolution, resolve};
use crate::syntax::{NoParser, ParserCache, SyntacticParser, Tokenizer, TokenizerKind, Tree};

/// Cardinality assumed for a plural headword without a usable number.
pub const DEFAULT_PLURAL_CARDINALITY: usize = 32;

/// Runs the whole focus and category pipeline over questions.
pub struct QuestionAnalyzer {
    tokenizer: Box<dyn Tokenizer>,
    parser: Arc<dyn SyntacticParser>,
    focus: FocusExtractor,
    lexicon: Arc<dyn Lexicon>,
    category_map: Arc<CategoryMap>,
    classifier: RulesClassifier,
    all_senses: bool,
}

impl std::fmt::Debug for QuestionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionAnalyzer")
            .field("lexicon", &self.lexicon.name())
            .field("category_map_entries", &self.category_map.len())
            .field("labels", &self.classifier.labels())
            .field("all_senses", &self.all_senses)
            .finish()
    }
}

impl QuestionAnalyzer {
    /// An analyzer with the PTB tokenizer, no parser, English rules and the
    /// fine label set.
    pub fn new(lexicon: Arc<dyn Lexicon>, category_map: Arc<CategoryMap>) -> Self {
        Self {
            tokenizer: TokenizerKind::default().build(),
            parser: Arc::new(NoParser),
            focus: FocusExtractor::english(),
            lexicon,
            category_map,
            classifier: RulesClassifier::default(),
            all_senses: false,
        }
    }

    /// Build from a configuration, loading every resource it names.
    ///
    /// The parse bank comes from `cache`, so analyzers built from configs
    /// naming the same bank share it.
    pub fn from_config(config: &AnalyzerConfig, cache: &ParserCache) -> QfocusResult<Self> {
        let lexicon = MemoryLexicon::load(&config.lexicon.path)?;
        let category_map = CategoryMap::load(&config.analysis.category_map)?;
        let bank = cache.get_or_load(&config.analysis.parse_bank)?;
        Ok(Self::new(Arc::new(lexicon), Arc::new(category_map))
            .with_tokenizer(config.analysis.tokenizer.build())
            .with_parser(bank)
            .with_all_senses(config.analysis.all_senses)
            .with_label_set(config.classification.labels))
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn SyntacticParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_focus_extractor(mut self, focus: FocusExtractor) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_all_senses(mut self, all_senses: bool) -> Self {
        self.all_senses = all_senses;
        self
    }

    pub fn with_label_set(mut self, labels: LabelSet) -> Self {
        self.classifier = RulesClassifier::new(labels, self.focus.cascade().clone());
        self
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    pub fn category_map(&self) -> &CategoryMap {
        &self.category_map
    }

    /// Tokenize, parse and analyze `text`.
    ///
    /// Questions the parser has no tree for keep their tokens; only the
    /// text rules of the cascade can fire for them.
    pub fn analyze(&self, text: &str) -> AnalyzedQuestion {
        let mut question = AnalyzedQuestion::new(text);
        let tokens = self.tokenizer.tokenize(text);
        let tree = self.parser.parse(&tokens);
        question.set_tokens(tokens);
        match tree {
            Some(tree) => self.attach_tree(&mut question, tree),
            None => tracing::debug!(question = text, "no parse available"),
        }
        self.complete(&mut question);
        question
    }

    /// Analyze `text` against a supplied parse; the tokens are its yield.
    pub fn analyze_parsed(&self, text: &str, tree: Tree) -> AnalyzedQuestion {
        let mut question = AnalyzedQuestion::new(text);
        question.set_tokens(tree.yield_words());
        self.attach_tree(&mut question, tree);
        self.complete(&mut question);
        question
    }

    /// Analyze independent questions in parallel, preserving order.
    pub fn analyze_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<AnalyzedQuestion> {
        texts.par_iter().map(|t| self.analyze(t.as_ref())).collect()
    }

    pub fn classify(&self, question: &AnalyzedQuestion) -> QuestionCategory {
        self.classifier.classify(question)
    }

    /// Analyze and classify `text`.
    pub fn resolve_category(&self, text: &str) -> QuestionCategory {
        self.classify(&self.analyze(text))
    }

    pub fn classify_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<QuestionCategory> {
        texts
            .par_iter()
            .map(|t| self.resolve_category(t.as_ref()))
            .collect()
    }

    /// Category lookup for a single word, with provenance.
    pub fn lookup(&self, word: &str, pos: Pos, all_senses: bool) -> Option<Resolution> {
        resolve(
            self.lexicon.as_ref(),
            word,
            pos,
            &self.category_map,
            all_senses,
        )
    }

    fn attach_tree(&self, question: &mut AnalyzedQuestion, tree: Tree) {
        let tags = tree.preterminal_yield();
        let attached = question
            .set_pos_tags(tags)
            .and_then(|()| question.set_parse_tree(tree));
        if let Err(err) = attached {
            tracing::warn!(question = question.text(), error = %err, "discarding malformed parse tree");
            let tokens = question.tokens().to_vec();
            question.set_tokens(tokens);
        }
    }

    fn complete(&self, question: &mut AnalyzedQuestion) {
        match self.focus.extract(question, self.lexicon.as_ref()) {
            Focus::Placeholder(category) => question.set_headword_category(category.as_str()),
            Focus::Headword(headword) => {
                question.set_headword_synonyms(self.lexicon.synonyms(&headword, None));
                self.resolve_headword(question, &headword);
            }
            Focus::Missing => {}
        }
    }

    /// Compound headword as a noun first, then the headword with the part
    /// of speech of its tag.
    fn resolve_headword(&self, question: &mut AnalyzedQuestion, headword: &str) {
        let lexicon = self.lexicon.as_ref();
        let mut found = question
            .compound_headword()
            .and_then(|c| resolve(lexicon, c, Pos::Noun, &self.category_map, self.all_senses));

        if found.is_none() {
            let tag = question
                .tokens()
                .iter()
                .position(|t| t == headword)
                .and_then(|i| question.pos_tags().get(i).cloned());
            let Some(tag) = tag else {
                return;
            };
            let Some(pos) = Pos::from_penn_tag(&tag) else {
                tracing::warn!(headword, tag = %tag, question = question.text(), "non-noun headword");
                return;
            };
            found = resolve(lexicon, headword, pos, &self.category_map, self.all_senses);
        }

        if let Some(resolution) = found {
            question.set_headword_category(resolution.category());
            question.append_trace(&format!("{PROVENANCE_DELIMITER}{}", resolution.provenance()));
        }
    }
}

/// How many answers a question expects.
///
/// A singular headword expects one. A plural headword expects the value of
/// the first cardinal number in the question, or
/// [`DEFAULT_PLURAL_CARDINALITY`] when there is none or it is not numeric.
pub fn cardinality(tokens: &[String], tags: &[String], headword: &str) -> usize {
    let Some(idx) = tokens.iter().position(|t| t == headword) else {
        return 1;
    };
    if !tags.get(idx).is_some_and(|t| t.ends_with('S')) {
        return 1;
    }
    tags.iter()
        .position(|t| t == "CD")
        .and_then(|i| tokens.get(i))
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_PLURAL_CARDINALITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconBuilder;
    use crate::syntax::ParseBank;

    const CAPITAL_TREE: &str = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN capital)) (PP (IN of) (NP (NNP France))))) (. ?)))";
    const LEGS_TREE: &str = "(ROOT (SBARQ (WHNP (WHADJP (WRB How) (JJ many)) (NNS legs)) (SQ (VBZ does) (NP (DT a) (NN spider)) (VP (VB have))) (. ?)))";

    fn analyzer() -> QuestionAnalyzer {
        let lexicon = LexiconBuilder::new("test")
            .synset(1, Pos::Noun, &["location"], &[])
            .synset(2, Pos::Noun, &["city"], &[1])
            .synset(3, Pos::Noun, &["capital"], &[2])
            .synset(4, Pos::Noun, &["leg"], &[])
            .build()
            .unwrap();
        let map: CategoryMap = [(2, "LOCATION_CITY"), (1, "LOCATION_OTHER")]
            .into_iter()
            .collect();
        let bank = ParseBank::from_text(&format!("{CAPITAL_TREE}\n{LEGS_TREE}\n")).unwrap();
        QuestionAnalyzer::new(Arc::new(lexicon), Arc::new(map)).with_parser(Arc::new(bank))
    }

    fn strs(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn headword_resolved_through_hypernyms() {
        let a = analyzer();
        let q = a.analyze("What is the capital of France?");
        assert_eq!(q.headword(), Some("capital"));
        assert_eq!(q.compound_headword(), None);
        assert_eq!(q.headword_category(), Some("LOCATION_CITY"));
        assert_eq!(q.extraction_trace(), "single (capital):::1sense.hypernyms[city]");
        assert_eq!(a.classify(&q), QuestionCategory::LocationCity);
    }

    #[test]
    fn placeholder_sets_category() {
        let a = analyzer();
        let q = a.analyze("How many legs does a spider have?");
        assert_eq!(q.headword(), None);
        assert_eq!(q.target_word(), Some("legs"));
        assert_eq!(q.headword_category(), Some("NUMERIC_COUNT"));
    }

    #[test]
    fn parse_miss_keeps_tokens() {
        let a = analyzer();
        let q = a.analyze("Who wrote Hamlet?");
        assert_eq!(q.tokens(), strs("Who wrote Hamlet ?").as_slice());
        assert!(q.parse_tree().is_none());
        assert_eq!(q.headword(), None);
        assert_eq!(a.classify(&q), QuestionCategory::HumanIndividual);
    }

    #[test]
    fn mismatched_tree_is_dropped() {
        let a = analyzer();
        let tree: Tree = "(ROOT (S (NP (NN dog)) (VP (VBZ barks))))".parse().unwrap();
        let mut q = AnalyzedQuestion::new("dog barks");
        q.set_tokens(strs("cat meows"));
        a.attach_tree(&mut q, tree);
        assert!(q.parse_tree().is_none());
        assert!(q.pos_tags().is_empty());
        assert_eq!(q.tokens(), strs("cat meows").as_slice());
    }

    #[test]
    fn batch_preserves_order() {
        let a = analyzer();
        let texts = ["How many legs does a spider have?", "What is the capital of France?"];
        let cats = a.classify_batch(&texts);
        assert_eq!(
            cats,
            vec![QuestionCategory::NumericCount, QuestionCategory::LocationCity]
        );
    }

    #[test]
    fn cardinality_of_headwords() {
        let tokens = strs("Name 3 rivers in Europe .");
        let tags = strs("VB CD NNS IN NNP .");
        assert_eq!(cardinality(&tokens, &tags, "rivers"), 3);
        assert_eq!(cardinality(&tokens, &tags, "Europe"), 1);

        let tokens = strs("Name some rivers .");
        let tags = strs("VB DT NNS .");
        assert_eq!(cardinality(&tokens, &tags, "rivers"), DEFAULT_PLURAL_CARDINALITY);

        let tokens = strs("Name three rivers .");
        let tags = strs("VB CD NNS .");
        assert_eq!(cardinality(&tokens, &tags, "rivers"), DEFAULT_PLURAL_CARDINALITY);
        assert_eq!(cardinality(&tokens, &tags, "lakes"), 1);
    }
}
