//! Head percolation tables.
//!
//! A [`HeadRuleTable`] maps a phrasal category to an ordered list of
//! [`HeadRule`]s. The built-in table is Collins' (1999: 236-238) with the
//! question-oriented changes that steer the head towards the noun the
//! question asks about instead of the auxiliary verb:
//!
//! ```text
//! (SBARQ (WHNP (WP What) (NN country)) (SQ ...))   → country, not "What"
//! (SQ (VBZ is) (NP the capital ...))               → NP, not "is"
//! (WHADVP (WRB How) (RB long))                     → long
//! ```

use std::collections::HashMap;
use std::fmt;

/// Search direction of a head rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// For each label in priority order, scan children left to right.
    Left,
    /// For each label in priority order, scan children right to left.
    Right,
    /// Scan children left to right; take the first whose label is in the set.
    LeftDis,
    /// Scan children right to left; take the first whose label is in the set.
    RightDis,
}

impl Direction {
    /// Whether the fallback child for this direction is the leftmost one.
    pub fn defaults_left(self) -> bool {
        matches!(self, Direction::Left | Direction::LeftDis)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::LeftDis => "leftdis",
            Direction::RightDis => "rightdis",
        };
        f.write_str(s)
    }
}

/// One head rule: a direction plus a priority list of child categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRule {
    pub direction: Direction,
    pub labels: Vec<String>,
}

impl HeadRule {
    pub fn new(direction: Direction, labels: &[&str]) -> Self {
        Self {
            direction,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Index of the child this rule selects, if any.
    ///
    /// `categories` are the basic categories of the children, in order.
    pub fn locate(&self, categories: &[&str]) -> Option<usize> {
        let n = categories.len();
        match self.direction {
            Direction::Left => self
                .labels
                .iter()
                .find_map(|l| (0..n).find(|&i| categories[i] == l)),
            Direction::Right => self
                .labels
                .iter()
                .find_map(|l| (0..n).rev().find(|&i| categories[i] == l)),
            Direction::LeftDis => {
                (0..n).find(|&i| self.labels.iter().any(|l| l == categories[i]))
            }
            Direction::RightDis => (0..n)
                .rev()
                .find(|&i| self.labels.iter().any(|l| l == categories[i])),
        }
    }
}

/// Category → ordered head rules.
#[derive(Debug, Clone, Default)]
pub struct HeadRuleTable {
    rules: HashMap<String, Vec<HeadRule>>,
}

impl HeadRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rules of one category.
    pub fn insert(&mut self, category: impl Into<String>, rules: Vec<HeadRule>) {
        self.rules.insert(category.into(), rules);
    }

    pub fn get(&self, category: &str) -> Option<&[HeadRule]> {
        self.rules.get(category).map(|r| r.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The Collins table with question-specific rule changes applied.
    pub fn question() -> Self {
        use Direction::*;
        let r = HeadRule::new;
        let mut t = Self::new();

        t.insert(
            "ADVP",
            vec![r(Right, &[
                "RB", "RBR", "RBS", "FW", "ADVP", "TO", "CD", "JJR", "JJ", "IN", "NP", "JJS", "NN",
            ])],
        );
        t.insert("INTJ", vec![r(Left, &[])]);
        t.insert("LST", vec![r(Right, &["LS", ":"])]);
        t.insert(
            "NAC",
            vec![r(Left, &[
                "NN", "NNS", "NNP", "NNPS", "NP", "NAC", "EX", "$", "CD", "QP", "PRP", "VBG", "JJ",
                "JJS", "JJR", "ADJP", "FW",
            ])],
        );
        t.insert("NX", vec![r(Right, &["NP", "NX"])]);
        t.insert("PRT", vec![r(Right, &["RP"])]);
        t.insert("RRC", vec![r(Right, &["VP", "NP", "ADVP", "ADJP", "PP"])]);
        t.insert(
            "X",
            vec![r(Right, &["S", "VP", "ADJP", "NP", "SBAR", "PP", "X"])],
        );
        t.insert(
            "ADJP",
            vec![r(Left, &[
                "$", "JJ", "NNS", "NN", "QP", "VBN", "VBG", "ADJP", "JJR", "NP", "JJS", "DT", "FW",
                "RBR", "RBS", "SBAR", "RB",
            ])],
        );
        t.insert(
            "QP",
            vec![r(Right, &[
                "$", "NNS", "NN", "CD", "JJ", "PDT", "DT", "IN", "RB", "NCD", "QP", "JJR", "JJS",
            ])],
        );
        t.insert("UCP", vec![r(Left, &[])]);
        t.insert("CONJP", vec![r(Right, &["TO", "RB", "IN", "CC"])]);
        t.insert(
            "PRN",
            vec![r(Left, &[
                "VP", "S", "SINV", "SBAR", "NP", "ADJP", "PP", "ADVP", "INTJ", "WHNP", "NAC",
                "VBP", "JJ", "NN", "NNP",
            ])],
        );
        t.insert("POSSP", vec![r(Right, &["POS"])]);
        t.insert("ROOT", vec![r(Left, &["S", "SQ", "SINV", "SBAR", "FRAG"])]);
        t.insert(
            "TYPO",
            vec![r(Left, &[
                "NN", "NP", "NNP", "NNPS", "TO", "VBD", "VBN", "MD", "VBZ", "VB", "VBG", "VBP",
                "VP", "ADJP", "FRAG",
            ])],
        );
        t.insert(
            "ADV",
            vec![r(Right, &[
                "RB", "RBR", "RBS", "FW", "ADVP", "TO", "CD", "JJR", "JJ", "IN", "NP", "JJS", "NN",
            ])],
        );
        t.insert("EDITED", vec![r(Left, &[])]);
        t.insert("XS", vec![r(Right, &["IN"])]);

        // Question-specific changes.
        t.insert(
            "NP",
            vec![
                r(RightDis, &["NP", "NN", "NNP", "NNPS", "NNS", "NX", "JJR"]),
                r(Right, &["NP", "PRP"]),
                r(RightDis, &["$", "ADJP", "PRN"]),
                r(Right, &["CD"]),
                r(RightDis, &["JJ", "JJS", "RB", "QP", "DT", "WDT", "RBR", "ADVP"]),
                r(Left, &["POS"]),
            ],
        );
        // Noun phrases over verbs; trailing WHPP ("... introduced (WHPP by what culture)").
        t.insert(
            "VP",
            vec![
                r(Right, &["WHPP", "PP", "WHNP"]),
                r(Left, &["S", "ADJP", "NN", "NNS", "NNP", "NP", "VP"]),
                r(Right, &["WHPP", "PP", "WHNP"]),
            ],
        );
        t.insert(
            "S",
            vec![
                r(Left, &["VP", "S", "FRAG", "SBAR", "ADJP", "UCP", "TO"]),
                r(Right, &["NP"]),
            ],
        );
        t.insert(
            "SBAR",
            vec![r(Left, &[
                "S", "SQ", "SINV", "SBAR", "FRAG", "WHNP", "WHPP", "WHADVP", "WHADJP", "IN", "DT",
            ])],
        );
        t.insert(
            "SBARQ",
            vec![r(Left, &["SQ", "S", "SINV", "SBARQ", "FRAG"])],
        );
        t.insert(
            "SQ",
            vec![r(Left, &[
                "NP", "VP", "NP", "SQ", "VB", "VBZ", "VBD", "VBP", "MD",
            ])],
        );
        // "(PP (IN by) (SBAR (WHNP (WP what) (NN culture))))" → SBAR.
        t.insert(
            "PP",
            vec![
                r(Left, &["WHNP", "NP", "WHADVP", "SBAR", "S"]),
                r(Right, &["IN", "TO", "VBG", "VBN", "RP", "FW"]),
                r(Left, &["PP"]),
            ],
        );
        t.insert(
            "WHNP",
            vec![
                r(Left, &["NP"]),
                r(RightDis, &["NN", "NNP", "NNPS", "NNS", "NX", "POS", "JJR"]),
                r(RightDis, &["$", "ADJP", "PRN"]),
                r(Right, &["CD"]),
                r(RightDis, &["JJ", "JJS", "RB", "QP"]),
                r(Left, &["WHNP", "WHPP", "WHADJP", "WP$", "WP", "WDT"]),
            ],
        );
        // "(WHPP At (WHNP what (NN speed))) does the Earth ..." → WHNP.
        t.insert("WHPP", vec![r(Right, &["WHNP", "WHADVP", "NP", "SBAR"])]);
        // "What (VBP are) (NP Canada's two (NNS territories))" → NP.
        t.insert(
            "SINV",
            vec![r(Left, &[
                "NP", "VP", "S", "SINV", "ADJP", "VBZ", "VBD", "VBP", "VB", "MD",
            ])],
        );
        t.insert("WHADVP", vec![r(Right, &["RB", "JJ"])]);
        t.insert("WHADJP", vec![r(Left, &["ADJP", "JJ", "WRB", "CC"])]);
        // "(FRAG (PP During World War II) , (SBAR Who was ...))" → SBAR.
        t.insert(
            "FRAG",
            vec![r(Left, &[
                "SBAR", "S", "SQ", "SINV", "ADJP", "ADVP", "FRAG",
            ])],
        );
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_is_priority_first() {
        // NP listed first wins even though NN appears earlier.
        let rule = HeadRule::new(Direction::Left, &["NP", "NN"]);
        assert_eq!(rule.locate(&["NN", "DT", "NP"]), Some(2));
    }

    #[test]
    fn right_scans_from_the_end() {
        let rule = HeadRule::new(Direction::Right, &["NN"]);
        assert_eq!(rule.locate(&["NN", "DT", "NN", "JJ"]), Some(2));
    }

    #[test]
    fn dis_variants_are_position_first() {
        let rule = HeadRule::new(Direction::LeftDis, &["NP", "NN"]);
        assert_eq!(rule.locate(&["NN", "DT", "NP"]), Some(0));
        let rule = HeadRule::new(Direction::RightDis, &["NN", "NP"]);
        assert_eq!(rule.locate(&["NP", "NN", "DT"]), Some(1));
    }

    #[test]
    fn empty_rule_never_matches() {
        let rule = HeadRule::new(Direction::Left, &[]);
        assert_eq!(rule.locate(&["NN", "VB"]), None);
    }

    #[test]
    fn question_table_has_question_rules() {
        let table = HeadRuleTable::question();
        let np = table.get("NP").unwrap();
        assert_eq!(np.len(), 6);
        assert_eq!(np[0].direction, Direction::RightDis);
        assert_eq!(table.get("WHADVP").unwrap()[0].labels, vec!["RB", "JJ"]);
        assert!(table.get("NN").is_none());
    }

    #[test]
    fn insert_overrides_a_category() {
        let mut table = HeadRuleTable::question();
        table.insert("SQ", vec![HeadRule::new(Direction::Right, &["VP"])]);
        assert_eq!(table.get("SQ").unwrap()[0].direction, Direction::Right);
    }
}
