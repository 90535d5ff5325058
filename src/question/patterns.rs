//! Ordered pattern cascade over question text and parse trees.
//!
//! Some questions are classified by their surface form alone: acronym
//! expansions, definitions, "How many ..." counts, "Where ..." locations.
//! The cascade holds these as an ordered list of [`PatternRule`]s. Rules are
//! tried in order and the first match ends the search.
//!
//! A rule matches one of three subjects:
//!
//! - the original question text,
//! - the canonical bracketed parse tree (`(ROOT (SBARQ ...))`), skipped
//!   when the question has no tree,
//! - the first token.
//!
//! A match yields a category, or no category for rules that only record a
//! target word (abbreviation requests), plus the extracted target word.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::AnalyzedQuestion;
use super::category::QuestionCategory;

/// What a rule's pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Text,
    Tree,
    FirstToken,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Text => f.write_str("text"),
            Subject::Tree => f.write_str("tree"),
            Subject::FirstToken => f.write_str("first-token"),
        }
    }
}

/// How a matching rule obtains its target word.
#[derive(Debug, Clone)]
pub enum Extraction {
    None,
    /// Capture group 1 of the rule's own pattern.
    Capture,
    /// Capture group 1 of a second pattern applied to the tree string.
    /// The rule still matches when this pattern does not.
    TreeCapture(Regex),
}

/// One cascade entry.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: &'static str,
    subject: Subject,
    pattern: Regex,
    category: Option<QuestionCategory>,
    extraction: Extraction,
}

impl PatternRule {
    pub fn new(
        name: &'static str,
        subject: Subject,
        pattern: &str,
        category: Option<QuestionCategory>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            subject,
            pattern: Regex::new(pattern)?,
            category,
            extraction: Extraction::None,
        })
    }

    /// Take the target word from capture group 1.
    pub fn capture(mut self) -> Self {
        self.extraction = Extraction::Capture;
        self
    }

    /// Take the target word from a second pattern over the tree string.
    pub fn tree_capture(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.extraction = Extraction::TreeCapture(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn category(&self) -> Option<QuestionCategory> {
        self.category
    }

    fn apply(&self, input: &PatternInput<'_>) -> Option<PatternMatch> {
        let subject = match self.subject {
            Subject::Text => input.text,
            Subject::Tree => input.tree?,
            Subject::FirstToken => input.first_token?,
        };
        let caps = self.pattern.captures(subject)?;
        let target = match &self.extraction {
            Extraction::None => None,
            Extraction::Capture => caps.get(1).map(|m| clean_target(m.as_str())),
            Extraction::TreeCapture(re) => input
                .tree
                .and_then(|t| re.captures(t))
                .and_then(|c| c.get(1))
                .map(|m| clean_target(m.as_str())),
        };
        Some(PatternMatch {
            rule: self.name,
            category: self.category,
            target: target.filter(|t| !t.is_empty()),
        })
    }
}

/// The outcome of a matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub rule: &'static str,
    /// `None` for rules that defer classification to later stages.
    pub category: Option<QuestionCategory>,
    pub target: Option<String>,
}

/// The strings a cascade looks at.
#[derive(Debug, Clone, Copy)]
pub struct PatternInput<'a> {
    pub text: &'a str,
    pub tree: Option<&'a str>,
    pub first_token: Option<&'a str>,
}

impl<'a> PatternInput<'a> {
    pub fn from_question(question: &'a AnalyzedQuestion) -> Self {
        Self {
            text: question.text(),
            tree: question.parse_tree_string(),
            first_token: question.tokens().first().map(String::as_str),
        }
    }
}

static TREE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\S+\s|\)").unwrap());

/// Remove `(TAG ` and `)` left over from tree captures.
fn clean_target(raw: &str) -> String {
    TREE_BRACKETS.replace_all(raw, "").trim().to_string()
}

/// An ordered, first-match-wins list of rules.
#[derive(Debug, Clone)]
pub struct PatternCascade {
    rules: Vec<PatternRule>,
}

static ENGLISH: LazyLock<PatternCascade> = LazyLock::new(english_rules);

impl PatternCascade {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// The English question rules.
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// The first matching rule's outcome.
    pub fn find(&self, input: &PatternInput<'_>) -> Option<PatternMatch> {
        let found = self.rules.iter().find_map(|r| r.apply(input));
        if let Some(m) = &found {
            tracing::debug!(
                rule = m.rule,
                category = m.category.map(QuestionCategory::as_str),
                target = m.target.as_deref(),
                "pattern matched"
            );
        }
        found
    }

    pub fn find_question(&self, question: &AnalyzedQuestion) -> Option<PatternMatch> {
        self.find(&PatternInput::from_question(question))
    }

    /// The category of the first matching rule. Deferring rules end the
    /// search without a category.
    pub fn categorize(&self, question: &AnalyzedQuestion) -> Option<QuestionCategory> {
        self.find_question(question).and_then(|m| m.category)
    }
}

impl Default for PatternCascade {
    fn default() -> Self {
        Self::english()
    }
}

// ---------------------------------------------------------------------------
// English rules
// ---------------------------------------------------------------------------

// Quoted all-caps acronym, e.g. `"NATO"`, ``` ``U.S.'' ```.
const ACRONYM: &str = r#"(?:"|``)? *((?-i:(?:\p{Lu}\.?)+)) *(?:"|'')?"#;

const COUNT_MANY_TREE: &str = r"(?i)^\(ROOT \(SBARQ \(WHNP (?:\(WHNP )?\(WHADJP \(WRB How\) \(JJ many\)\).*?\((?:NNS|NNPS) (.*?)\)+";
const COUNT_MUCH_TREE: &str =
    r"(?i)^\(ROOT \(SBARQ \(WHNP \(WHADJP \(WRB How\) \(JJ much\)\) \(NN (.*?)\)";

fn english_rules() -> PatternCascade {
    use QuestionCategory::*;
    use Subject::*;

    let rule = |name, subject, pattern: &str, category| {
        PatternRule::new(name, subject, pattern, category).unwrap()
    };
    let first_word = |name, words: &str, category| {
        rule(name, FirstToken, &format!("(?i)^(?:{words})$"), Some(category))
    };
    let how = |name, pattern: &str, category| rule(name, Text, pattern, Some(category));

    PatternCascade::new(vec![
        // Acronym expansion.
        rule(
            "expansion-what-is",
            Text,
            &format!(r"(?i)^What(?:'s|\s+is)\s+{ACRONYM}\s*.?$"),
            Some(AbbreviationExpansion),
        )
        .capture(),
        rule(
            "expansion-stand-for",
            Text,
            &format!(r"(?i)^What\s+does.*?{ACRONYM}\s+stands?\s+for\s*.?$"),
            Some(AbbreviationExpansion),
        )
        .capture(),
        rule(
            "expansion-mean",
            Text,
            &format!(r"(?i)^What\s+does.*?{ACRONYM}\s+mean"),
            Some(AbbreviationExpansion),
        )
        .capture(),
        rule(
            "expansion-acronym-for",
            Text,
            &format!(r"(?i)^{ACRONYM}\s+is\s+(?:an|the)\s+(?:acronym|abbreviation)\s+(?:for|of)\s+w"),
            Some(AbbreviationExpansion),
        )
        .capture(),
        // Abbreviation requests: record the phrase, classify later.
        rule(
            "abbreviation-for",
            Text,
            r"(?i)^What(?:'s|\s+is)\s+the\s+(?:abbreviation|acronym)\s+(?:for|of)\s+(?:the\s+|)([\w ]+)",
            None,
        )
        .capture(),
        rule(
            "abbreviated-term",
            Text,
            r"(?i)^What(?:'s|\s+is)\s+the\s+abbreviated\s+(?:term|form|expression)\s+(?:used\s+|)(?:for|of)\s+(?:the\s+|)([\w ]+)",
            None,
        )
        .capture(),
        rule(
            "abbreviation-of-term",
            Text,
            r"(?i)^What(?:'s|\s+is)\s+([\w .]+) +an +(?:acronym|abbreviation)\s+(?:for|of)",
            None,
        )
        .capture(),
        // Definitions.
        rule(
            "definition-what-is-tree",
            Tree,
            r"(?i)^\(ROOT \(SBARQ \(WHNP \(WP What\)\) \(SQ \(VB[ZP] (?:is|'s|are)\) \(NP(?: \(DT (?:an?)\))?((?: \((?:NNP?S?|JJ|FW) [^)]+\))+)\)\)(?: \([?.] [?.]\))?\)\)$",
            Some(DescriptionDefinition),
        )
        .capture(),
        rule(
            "definition-define-tree",
            Tree,
            r"(?i)^\(ROOT \(S \(VP \(VB Define\)(?: \(NP(?: \(DT (?:the|an?)\))?)?((?: \((?:NNP?S?|JJ|FW) [^)]+\))+)\)\)?(?: \([?.] [?.]\))?\)\)$",
            Some(DescriptionDefinition),
        )
        .capture(),
        rule(
            "definition-mean",
            Text,
            r"(?i)^What\s+does(.*)mean",
            Some(DescriptionDefinition),
        )
        .capture(),
        rule(
            "definition-define",
            Text,
            r"(?i)^Define\s+(?:(?:the|an?)\s+)?([^?.]+)",
            Some(DescriptionDefinition),
        )
        .capture(),
        rule(
            "substance",
            Text,
            r"(?i)^What(?:'s|\s+(?:is|are))\s+.*(?:composed|made(?:\s+out)?)\s+of\s*.?$",
            Some(EntitySubstance),
        ),
        rule(
            "term-what-do-you-call",
            Text,
            r"(?i)^What\s+do\s+you\s+call",
            Some(EntityTerm),
        ),
        rule(
            "reason-what-causes",
            Text,
            r"(?i)^What\s+cause[ds]?",
            Some(DescriptionReason),
        ),
        rule(
            "reason-used-for",
            Text,
            r"(?i)^What(?:'s|\s+(?:is|are))\s+.*(?:used|known)\s+for\s*.?$",
            Some(DescriptionReason),
        ),
        rule(
            "human-description-tree",
            Tree,
            r"(?i)^\(ROOT \(SBARQ \(WHNP \(WP Who\)\) \(SQ \(VB[ZD] (?:is|'s|was)\) \(NP((?: \(NNP?S? [^)]+\))+)\)\)(?: \([?.] [?.]\))?\)\)$",
            Some(HumanDescription),
        )
        .capture(),
        // Leading words.
        rule(
            "where-mountain",
            Text,
            r"^Where .*[Mm]ountains? .*$",
            Some(LocationMountain),
        ),
        first_word("where", "where", LocationOther),
        first_word("why", "why", DescriptionReason),
        first_word("when", "when", NumericDate),
        first_word("who", "who|whose|whom", HumanIndividual),
        // How ...
        how("how-say", r"^How do (?:you|I) say .*$", EntityTerm),
        how("how-defined", r"^How is.* defined.*$", DescriptionDefinition),
        how("how-long-is", r"^How long is .*$", NumericDistance),
        how("how-much-weight", r"^How much.* weights?\W.*$", NumericWeight),
        how(
            "how-much-money",
            r"^How much (?:.* )?(?:cost|rent|fine|fined|sell|spend|spent|charge|charged|paid|pay|worth|taxed|tax|wage)\W.*$|^How much money .*$",
            NumericMoney,
        ),
        how("how-big", r"^How big .*$", NumericSize),
        how(
            "how-manner",
            r"^How (?:can|close|did|do|does|effective|has|is|successful|was|were|you|would) .*$",
            DescriptionManner,
        ),
        how("how-come", r"^How come .*$", DescriptionReason),
        how(
            "how-dimension",
            r"^How (?:deep|far|high|tall|wide|large) .*$",
            NumericDistance,
        ),
        how("how-fast", r"^How fast .*$", NumericSpeed),
        how("how-hot", r"^How hot .*$", NumericTemperature),
        how("how-other", r"^How (?:large|loud|often) .*$", NumericOther),
        how("how-period", r"^How (?:long|old) .*$", NumericPeriod),
        how("how-many", r"^How many .*$", NumericCount)
            .tree_capture(COUNT_MANY_TREE)
            .unwrap(),
        how("how-much", r"^How much .*$", NumericCount)
            .tree_capture(COUNT_MUCH_TREE)
            .unwrap(),
        how("how", r"^How .*$", DescriptionManner),
    ])
}
