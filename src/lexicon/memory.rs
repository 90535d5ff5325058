//! In-process lexicon backed by a petgraph digraph.
//!
//! Nodes are synsets, edges point from a synset to its hypernym. Hyponyms
//! are the incoming edges. A lemma index maps `(pos, lemma)` to the synsets
//! containing it in file order, which is the sense order.

use std::collections::HashMap;
use std::path::Path;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::error::{LexiconError, LexiconResult};
use super::{Lexicon, Pos, SynsetId, morphy, normalize_word};

/// One synset as stored in a lexicon file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetRecord {
    pub id: u64,
    pub pos: Pos,
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub gloss: String,
    #[serde(default)]
    pub hypernyms: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LexiconFile {
    #[serde(default = "default_name")]
    name: String,
    synsets: Vec<SynsetRecord>,
}

fn default_name() -> String {
    "lexicon".to_string()
}

#[derive(Debug, Clone)]
struct SynsetNode {
    id: SynsetId,
    lemmas: Vec<String>,
    gloss: String,
}

/// Petgraph-backed lexicon.
#[derive(Debug)]
pub struct MemoryLexicon {
    name: String,
    graph: DiGraph<SynsetNode, ()>,
    nodes: HashMap<SynsetId, NodeIndex>,
    index: HashMap<(Pos, String), Vec<SynsetId>>,
}

impl MemoryLexicon {
    /// Build from synset records. Ids must be unique and every hypernym must
    /// refer to a record in the same set.
    pub fn from_records(name: impl Into<String>, records: Vec<SynsetRecord>) -> LexiconResult<Self> {
        let mut graph = DiGraph::with_capacity(records.len(), records.len());
        let mut nodes: HashMap<SynsetId, NodeIndex> = HashMap::with_capacity(records.len());
        let mut index: HashMap<(Pos, String), Vec<SynsetId>> = HashMap::new();

        for record in &records {
            let id = SynsetId(record.id);
            if nodes.contains_key(&id) {
                return Err(LexiconError::DuplicateSynset { id: record.id });
            }
            let idx = graph.add_node(SynsetNode {
                id,
                lemmas: record.lemmas.clone(),
                gloss: record.gloss.clone(),
            });
            nodes.insert(id, idx);

            for lemma in &record.lemmas {
                let senses = index.entry((record.pos, normalize_word(lemma))).or_default();
                if !senses.contains(&id) {
                    senses.push(id);
                }
            }
        }

        for record in &records {
            let from = nodes[&SynsetId(record.id)];
            for &h in &record.hypernyms {
                let to = nodes
                    .get(&SynsetId(h))
                    .copied()
                    .ok_or(LexiconError::DanglingHypernym { from: record.id, to: h })?;
                graph.add_edge(from, to, ());
            }
        }

        let lexicon = Self {
            name: name.into(),
            graph,
            nodes,
            index,
        };
        tracing::info!(
            name = %lexicon.name,
            synsets = lexicon.len(),
            lemmas = lexicon.index.len(),
            "built lexicon"
        );
        Ok(lexicon)
    }

    /// Parse a JSON lexicon document.
    pub fn from_json_str(json: &str) -> LexiconResult<Self> {
        let file: LexiconFile = serde_json::from_str(json).map_err(|e| LexiconError::Malformed {
            message: e.to_string(),
        })?;
        Self::from_records(file.name, file.synsets)
    }

    /// Load a JSON lexicon file.
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of synsets.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Resolve `word` to its index key, trying base forms when the surface
    /// form is not indexed.
    fn lookup(&self, word: &str, pos: Pos) -> Option<(&str, &[SynsetId])> {
        let key = normalize_word(word);
        if key.is_empty() {
            return None;
        }
        if let Some((k, senses)) = self.index.get_key_value(&(pos, key.clone())) {
            return Some((k.1.as_str(), senses.as_slice()));
        }
        morphy::base_forms(&key, pos).into_iter().find_map(|base| {
            self.index
                .get_key_value(&(pos, base))
                .map(|(k, senses)| (k.1.as_str(), senses.as_slice()))
        })
    }

    fn node(&self, id: SynsetId) -> Option<&SynsetNode> {
        self.nodes.get(&id).map(|&idx| &self.graph[idx])
    }

    fn neighbors(&self, id: SynsetId, dir: Direction) -> Vec<SynsetId> {
        let Some(&idx) = self.nodes.get(&id) else {
            return Vec::new();
        };
        // petgraph lists neighbors most recently added first.
        let mut out: Vec<SynsetId> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].id)
            .collect();
        out.reverse();
        out
    }
}

impl Lexicon for MemoryLexicon {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_lemma(&self, word: &str, pos: Pos) -> Option<String> {
        self.lookup(word, pos).map(|(lemma, _)| lemma.replace('_', " "))
    }

    fn senses(&self, word: &str, pos: Pos) -> Vec<SynsetId> {
        self.lookup(word, pos)
            .map(|(_, senses)| senses.to_vec())
            .unwrap_or_default()
    }

    fn hypernyms_of(&self, id: SynsetId) -> Vec<SynsetId> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn hyponyms_of(&self, id: SynsetId) -> Vec<SynsetId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn lemmas(&self, id: SynsetId) -> Vec<String> {
        self.node(id).map(|n| n.lemmas.clone()).unwrap_or_default()
    }

    fn gloss_of(&self, id: SynsetId) -> Option<String> {
        self.node(id)
            .map(|n| n.gloss.clone())
            .filter(|g| !g.is_empty())
    }
}

/// Incremental construction of a [`MemoryLexicon`], mostly for tests and
/// small embedded vocabularies.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    name: String,
    records: Vec<SynsetRecord>,
}

impl LexiconBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Add a synset. Sense order follows the order of calls.
    pub fn synset(mut self, id: u64, pos: Pos, lemmas: &[&str], hypernyms: &[u64]) -> Self {
        self.records.push(SynsetRecord {
            id,
            pos,
            lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
            gloss: String::new(),
            hypernyms: hypernyms.to_vec(),
        });
        self
    }

    /// Set the gloss of an already added synset.
    pub fn gloss(mut self, id: u64, gloss: &str) -> Self {
        if let Some(r) = self.records.iter_mut().find(|r| r.id == id) {
            r.gloss = gloss.to_string();
        }
        self
    }

    pub fn build(self) -> LexiconResult<MemoryLexicon> {
        MemoryLexicon::from_records(self.name, self.records)
    }
}
