//! Labelled constituency trees.
//!
//! Internal nodes carry syntactic categories (`SBARQ`, `WHNP`, `NN`, ...),
//! leaves carry tokens. The canonical serialization is the Penn Treebank
//! bracketed form produced by [`Tree`]'s `Display` impl, e.g.
//! `(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT a) (NN cat))) (. ?)))`.
//! The pattern cascade matches regular expressions against exactly this form,
//! so the writer never emits extra whitespace.

use std::fmt;
use std::str::FromStr;

use super::error::{SyntaxError, SyntaxResult};

/// Label given to the unnamed outermost bracket of treebank files.
pub const ROOT_LABEL: &str = "ROOT";

/// A constituency parse tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl Tree {
    /// Create a leaf (terminal) node.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create an internal node with the given children.
    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Create a preterminal: a tag node over a single word.
    pub fn preterminal(tag: impl Into<String>, word: impl Into<String>) -> Self {
        Self::node(tag, vec![Self::leaf(word)])
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A preterminal has exactly one child, and that child is a leaf.
    pub fn is_preterminal(&self) -> bool {
        self.children.len() == 1 && self.children[0].is_leaf()
    }

    /// A phrasal node is neither a leaf nor a preterminal.
    pub fn is_phrasal(&self) -> bool {
        !(self.is_leaf() || self.is_preterminal())
    }

    /// The label with function tags and indices stripped (`NP-SBJ-1` → `NP`).
    ///
    /// Leaves are returned untouched, as are labels that start with a dash
    /// such as `-LRB-`.
    pub fn basic_category(&self) -> &str {
        if self.is_leaf() {
            return &self.label;
        }
        basic_category(&self.label)
    }

    /// All terminal nodes, left to right.
    pub fn terminals(&self) -> Vec<&Tree> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a Tree>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_terminals(out);
            }
        }
    }

    /// The first terminal under this node (the node itself for a leaf).
    pub fn first_terminal(&self) -> &Tree {
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
        }
        node
    }

    /// Token sequence under this node.
    pub fn yield_words(&self) -> Vec<String> {
        self.terminals()
            .into_iter()
            .map(|t| t.label.clone())
            .collect()
    }

    /// All preterminal nodes, left to right.
    pub fn preterminals(&self) -> Vec<&Tree> {
        let mut out = Vec::new();
        self.collect_preterminals(&mut out);
        out
    }

    fn collect_preterminals<'a>(&'a self, out: &mut Vec<&'a Tree>) {
        if self.is_preterminal() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_preterminals(out);
            }
        }
    }

    /// Part-of-speech tags aligned with [`Tree::yield_words`].
    pub fn preterminal_yield(&self) -> Vec<String> {
        self.preterminals()
            .into_iter()
            .map(|t| t.label.clone())
            .collect()
    }

    /// Degenerate trees carry no usable structure: a bare leaf, or a root
    /// without a single preterminal below it.
    pub fn is_degenerate(&self) -> bool {
        self.is_leaf() || self.preterminals().is_empty()
    }

    fn write_bracketed(&self, out: &mut String) {
        if self.is_leaf() {
            out.push_str(&self.label);
            return;
        }
        out.push('(');
        out.push_str(&self.label);
        for child in &self.children {
            out.push(' ');
            child.write_bracketed(out);
        }
        out.push(')');
    }
}

/// Strip function tags from a raw category label.
pub fn basic_category(label: &str) -> &str {
    let dash = label.find('-');
    let eq = label.find('=');
    let cut = match (dash, eq) {
        (Some(d), Some(e)) => Some(d.min(e)),
        (d, e) => d.or(e),
    };
    match cut {
        Some(idx) if idx > 0 => &label[..idx],
        _ => label,
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_bracketed(&mut out);
        f.write_str(&out)
    }
}

// ---------------------------------------------------------------------------
// Bracketed reader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Lexeme<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn lex(input: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' | ')' => {
                if let Some(s) = start.take() {
                    lexemes.push(Lexeme::Atom(&input[s..i]));
                }
                lexemes.push(if c == '(' { Lexeme::Open } else { Lexeme::Close });
            }
            c if c.is_whitespace() => {
                if let Some(s) = start.take() {
                    lexemes.push(Lexeme::Atom(&input[s..i]));
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        lexemes.push(Lexeme::Atom(&input[s..]));
    }
    lexemes
}

struct Reader<'a> {
    input: &'a str,
    lexemes: Vec<Lexeme<'a>>,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_node(&mut self) -> SyntaxResult<Tree> {
        match self.lexemes.get(self.pos) {
            Some(Lexeme::Open) => self.pos += 1,
            Some(Lexeme::Atom(a)) => {
                return Err(SyntaxError::UnexpectedToken {
                    token: a.to_string(),
                    position: self.pos,
                });
            }
            Some(Lexeme::Close) => {
                return Err(SyntaxError::Unbalanced {
                    input: self.input.to_string(),
                });
            }
            None => return Err(SyntaxError::EmptyTree),
        }

        // "( (S ...))": the outermost bracket of treebank files is unlabelled.
        let label = match self.lexemes.get(self.pos) {
            Some(Lexeme::Atom(a)) => {
                self.pos += 1;
                a.to_string()
            }
            Some(Lexeme::Open) => ROOT_LABEL.to_string(),
            Some(Lexeme::Close) => {
                return Err(SyntaxError::UnexpectedToken {
                    token: ")".into(),
                    position: self.pos,
                });
            }
            None => {
                return Err(SyntaxError::Unbalanced {
                    input: self.input.to_string(),
                });
            }
        };

        let mut children = Vec::new();
        loop {
            match self.lexemes.get(self.pos) {
                Some(Lexeme::Open) => children.push(self.read_node()?),
                Some(Lexeme::Atom(a)) => {
                    children.push(Tree::leaf(*a));
                    self.pos += 1;
                }
                Some(Lexeme::Close) => {
                    self.pos += 1;
                    return Ok(Tree::node(label, children));
                }
                None => {
                    return Err(SyntaxError::Unbalanced {
                        input: self.input.to_string(),
                    });
                }
            }
        }
    }
}

impl FromStr for Tree {
    type Err = SyntaxError;

    fn from_str(s: &str) -> SyntaxResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SyntaxError::EmptyTree);
        }
        let mut reader = Reader {
            input: trimmed,
            lexemes: lex(trimmed),
            pos: 0,
        };
        let tree = reader.read_node()?;
        if reader.pos < reader.lexemes.len() {
            let rest: Vec<String> = reader.lexemes[reader.pos..]
                .iter()
                .map(|l| match l {
                    Lexeme::Open => "(".to_string(),
                    Lexeme::Close => ")".to_string(),
                    Lexeme::Atom(a) => a.to_string(),
                })
                .collect();
            return Err(SyntaxError::TrailingInput {
                rest: rest.join(" "),
            });
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: &str =
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT a) (NN cat))) (. ?)))";

    #[test]
    fn round_trips_canonical_form() {
        let tree: Tree = CAT.parse().unwrap();
        assert_eq!(tree.to_string(), CAT);
    }

    #[test]
    fn normalizes_whitespace() {
        let tree: Tree = "(ROOT\n  (S (NP  (NN dog))\t(VP (VBZ barks))))".parse().unwrap();
        assert_eq!(tree.to_string(), "(ROOT (S (NP (NN dog)) (VP (VBZ barks))))");
    }

    #[test]
    fn unlabelled_outer_bracket_becomes_root() {
        let tree: Tree = "( (S (NN dog)))".parse().unwrap();
        assert_eq!(tree.label(), ROOT_LABEL);
        assert_eq!(tree.children()[0].label(), "S");
    }

    #[test]
    fn yields_are_aligned() {
        let tree: Tree = CAT.parse().unwrap();
        assert_eq!(tree.yield_words(), vec!["What", "is", "a", "cat", "?"]);
        assert_eq!(tree.preterminal_yield(), vec!["WP", "VBZ", "DT", "NN", "."]);
    }

    #[test]
    fn node_kinds() {
        let tree: Tree = CAT.parse().unwrap();
        let whnp = &tree.children()[0].children()[0];
        assert!(whnp.is_phrasal());
        assert!(whnp.children()[0].is_preterminal());
        assert!(whnp.children()[0].children()[0].is_leaf());
        assert_eq!(tree.first_terminal().label(), "What");
    }

    #[test]
    fn basic_category_strips_function_tags() {
        assert_eq!(basic_category("NP-SBJ-1"), "NP");
        assert_eq!(basic_category("PP=2"), "PP");
        assert_eq!(basic_category("-LRB-"), "-LRB-");
        assert_eq!(basic_category("WHNP"), "WHNP");
    }

    #[test]
    fn degenerate_trees() {
        assert!(Tree::leaf("ROOT").is_degenerate());
        assert!("(ROOT What is)".parse::<Tree>().unwrap().is_degenerate());
        assert!(!CAT.parse::<Tree>().unwrap().is_degenerate());
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!("".parse::<Tree>(), Err(SyntaxError::EmptyTree)));
        assert!(matches!(
            "(ROOT (NN dog)".parse::<Tree>(),
            Err(SyntaxError::Unbalanced { .. })
        ));
        assert!(matches!(
            "(ROOT (NN dog)) (X y)".parse::<Tree>(),
            Err(SyntaxError::TrailingInput { .. })
        ));
        assert!(matches!(
            "dog".parse::<Tree>(),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
    }
}
