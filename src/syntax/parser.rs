//! Syntactic parser interface and the pre-parsed parse bank.
//!
//! Statistical parsing is outside this crate. Questions are parsed offline
//! and the trees stored one per line in a parse bank; [`ParseBank`] serves
//! them back keyed by token sequence. Loaded banks are shared through a
//! [`ParserCache`] owned by whoever builds the analyzers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{SyntaxError, SyntaxResult};
use super::tree::Tree;

/// Turns a token sequence into a constituency tree.
pub trait SyntacticParser: Send + Sync {
    /// `None` when the parser has no tree for these tokens.
    fn parse(&self, tokens: &[String]) -> Option<Tree>;
}

/// Trees indexed by their leaf yield.
#[derive(Debug, Clone, Default)]
pub struct ParseBank {
    trees: HashMap<String, Tree>,
}

impl ParseBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a bank file: one bracketed tree per line, `#` comments.
    pub fn load(path: &Path) -> SyntaxResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SyntaxError::ParseBankIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let bank = Self::parse_lines(&content, &path.display().to_string())?;
        tracing::info!(path = %path.display(), trees = bank.len(), "loaded parse bank");
        Ok(bank)
    }

    /// Build a bank from in-memory text in the same format as [`ParseBank::load`].
    pub fn from_text(content: &str) -> SyntaxResult<Self> {
        Self::parse_lines(content, "<memory>")
    }

    fn parse_lines(content: &str, origin: &str) -> SyntaxResult<Self> {
        let mut bank = Self::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tree: Tree = line.parse().map_err(|e| SyntaxError::ParseBankLine {
                path: origin.to_string(),
                line: i + 1,
                source: Box::new(e),
            })?;
            bank.insert(tree);
        }
        Ok(bank)
    }

    /// Add a tree, replacing any earlier tree with the same yield.
    pub fn insert(&mut self, tree: Tree) {
        let key = tree.yield_words().join(" ");
        self.trees.insert(key, tree);
    }

    pub fn get(&self, tokens: &[String]) -> Option<&Tree> {
        self.trees.get(&tokens.join(" "))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl SyntacticParser for ParseBank {
    fn parse(&self, tokens: &[String]) -> Option<Tree> {
        let tree = self.get(tokens).cloned();
        if tree.is_none() {
            tracing::debug!(tokens = %tokens.join(" "), "no tree in parse bank");
        }
        tree
    }
}

/// A parser that never has a tree. Text-only analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParser;

impl SyntacticParser for NoParser {
    fn parse(&self, _tokens: &[String]) -> Option<Tree> {
        None
    }
}

/// Loaded parse banks keyed by resource path.
///
/// Each path is read at most once per cache; later requests share the
/// same [`Arc`].
#[derive(Default)]
pub struct ParserCache {
    banks: Mutex<HashMap<PathBuf, Arc<ParseBank>>>,
}

impl std::fmt::Debug for ParserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.banks.lock().map(|b| b.len()).unwrap_or(0);
        f.debug_struct("ParserCache")
            .field("bank_count", &count)
            .finish()
    }
}

impl ParserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bank at `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> SyntaxResult<Arc<ParseBank>> {
        let mut banks = self.banks.lock().expect("parser cache lock poisoned");
        if let Some(bank) = banks.get(path) {
            return Ok(Arc::clone(bank));
        }
        let bank = Arc::new(ParseBank::load(path)?);
        banks.insert(path.to_path_buf(), Arc::clone(&bank));
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.banks.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const BANK: &str = "\
# questions
(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT a) (NN cat))) (. ?)))

(ROOT (SBARQ (WHNP (WP Who)) (SQ (VBD was) (NP (NNP Abraham) (NNP Lincoln))) (. ?)))
";

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn indexes_by_yield() {
        let bank = ParseBank::from_text(BANK).unwrap();
        assert_eq!(bank.len(), 2);
        let tree = bank.parse(&toks("Who was Abraham Lincoln ?")).unwrap();
        assert_eq!(tree.children()[0].label(), "SBARQ");
        assert!(bank.parse(&toks("Who is it ?")).is_none());
    }

    #[test]
    fn reports_bad_line_number() {
        let err = ParseBank::from_text("(ROOT (NN a))\n\n(ROOT (NN b)").unwrap_err();
        assert!(matches!(err, SyntaxError::ParseBankLine { line: 3, .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ParseBank::load(Path::new("/nonexistent/qfocus/bank.mrg")).unwrap_err();
        assert!(matches!(err, SyntaxError::ParseBankIo { .. }));
    }

    #[test]
    fn cache_loads_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BANK.as_bytes()).unwrap();

        let cache = ParserCache::new();
        let a = cache.get_or_load(file.path()).unwrap();
        let b = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }
}
