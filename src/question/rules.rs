//! Rule-based question classifier.

use super::AnalyzedQuestion;
use super::category::{LabelSet, QuestionCategory, coarsen};
use super::patterns::PatternCascade;
use crate::lexicon::search::strip_provenance;

/// Turns an analyzed question into one category label.
///
/// The resolved headword category wins. Without one, the pattern cascade
/// is asked again. Labels outside the active [`LabelSet`] are coarsened,
/// and anything still unknown becomes [`QuestionCategory::Void`].
#[derive(Debug, Clone, Default)]
pub struct RulesClassifier {
    labels: LabelSet,
    cascade: PatternCascade,
}

impl RulesClassifier {
    pub fn new(labels: LabelSet, cascade: PatternCascade) -> Self {
        Self { labels, cascade }
    }

    pub fn with_labels(labels: LabelSet) -> Self {
        Self::new(labels, PatternCascade::english())
    }

    pub fn labels(&self) -> LabelSet {
        self.labels
    }

    pub fn classify(&self, question: &AnalyzedQuestion) -> QuestionCategory {
        match question.headword_category() {
            Some(label) if !label.is_empty() => self.decide(Some(label)),
            _ => {
                let fallback = self.cascade.categorize(question);
                self.decide(fallback.map(QuestionCategory::as_str))
            }
        }
    }

    /// Map a raw (possibly annotated) label into the active label set.
    pub fn decide(&self, label: Option<&str>) -> QuestionCategory {
        let Some(label) = label.map(strip_provenance).filter(|l| !l.is_empty()) else {
            return QuestionCategory::Void;
        };
        if let Some(category) = self.labels.lookup(label) {
            return category;
        }
        let coarse = coarsen(label);
        self.labels.lookup(coarse).unwrap_or_else(|| {
            tracing::debug!(label, coarse, "unrecognized category label");
            QuestionCategory::Void
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headword_category_wins() {
        let mut q = AnalyzedQuestion::new("Where is Paris?");
        q.set_headword_category("LOCATION_CITY");
        let c = RulesClassifier::default();
        assert_eq!(c.classify(&q), QuestionCategory::LocationCity);
    }

    #[test]
    fn falls_back_to_patterns() {
        let mut q = AnalyzedQuestion::new("Where is Paris ?");
        q.set_tokens(vec!["Where".into(), "is".into(), "Paris".into(), "?".into()]);
        let c = RulesClassifier::default();
        assert_eq!(c.classify(&q), QuestionCategory::LocationOther);
    }

    #[test]
    fn nothing_is_void() {
        let q = AnalyzedQuestion::new("Name a flying mammal.");
        assert_eq!(RulesClassifier::default().classify(&q), QuestionCategory::Void);
    }

    #[test]
    fn coarse_labels() {
        let c = RulesClassifier::with_labels(LabelSet::Coarse);
        assert_eq!(c.decide(Some("LOCATION_CITY")), QuestionCategory::Location);
        assert_eq!(c.decide(Some("HUMAN")), QuestionCategory::Human);
        assert_eq!(c.decide(Some("FOO_BAR")), QuestionCategory::Void);
        assert_eq!(c.decide(None), QuestionCategory::Void);
        assert_eq!(c.decide(Some("")), QuestionCategory::Void);
    }

    #[test]
    fn unknown_fine_label_is_coarsened() {
        let c = RulesClassifier::default();
        assert_eq!(c.decide(Some("LOCATION_MOON")), QuestionCategory::Location);
        assert_eq!(
            c.decide(Some("NUMERIC_COUNT:::1sense[leg]")),
            QuestionCategory::NumericCount
        );
    }
}
