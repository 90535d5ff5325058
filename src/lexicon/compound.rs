//! Compound headword extraction.
//!
//! A headword is extended with the premodifiers in front of it
//! ("personal identification *number*") or with a prepositional
//! postmodifier ("*capital* of France"), provided the lexicon knows the
//! resulting phrase as a noun.

use std::sync::LazyLock;

use regex::Regex;

use super::Lexicon;

static PREMODIFIER_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:NNP?S?|JJS?)$").unwrap());
static PREMODIFIER_IGNORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:many|much|main)$").unwrap());
static POSTMODIFIER_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:DT|NNP?S?|JJS?)$").unwrap());

/// Extends headwords to compounds found in a lexicon.
pub struct CompoundWordExtractor<'a, L: Lexicon + ?Sized> {
    lexicon: &'a L,
}

impl<'a, L: Lexicon + ?Sized> CompoundWordExtractor<'a, L> {
    pub fn new(lexicon: &'a L) -> Self {
        Self { lexicon }
    }

    /// The longest known compound around `head`, or `head` itself.
    ///
    /// Premodifiers are tried first (also without the leftmost one when
    /// there are more than two), then a postmodifier starting with a
    /// preposition. `tags` must be aligned with `tokens`.
    pub fn extract(&self, tokens: &[String], tags: &[String], head: &str) -> String {
        let Some(idx) = tokens.iter().position(|t| t == head) else {
            return head.to_string();
        };

        let mut pre = premodifiers(tokens, tags, idx);
        if !pre.is_empty() {
            pre.push(head);
            let compound = pre.join(" ");
            if self.lexicon.contains_word(&compound) {
                tracing::debug!(head, compound = %compound, "premodified compound");
                return compound;
            }
            if pre.len() > 2 {
                let compound = pre[1..].join(" ");
                if self.lexicon.contains_word(&compound) {
                    tracing::debug!(head, compound = %compound, "premodified compound");
                    return compound;
                }
            }
        }

        let post = postmodifiers(tokens, tags, idx);
        if post.len() > 1 {
            let compound = format!("{head} {}", post.join(" "));
            if self.lexicon.contains_word(&compound) {
                tracing::debug!(head, compound = %compound, "postmodified compound");
                return compound;
            }
        }

        head.to_string()
    }
}

/// Nouns and adjectives directly before `idx`, in sentence order.
fn premodifiers<'t>(tokens: &'t [String], tags: &[String], idx: usize) -> Vec<&'t str> {
    let mut out: Vec<&str> = (0..idx)
        .rev()
        .take_while(|&i| {
            tags.get(i).is_some_and(|t| PREMODIFIER_TAGS.is_match(t))
                && !PREMODIFIER_IGNORE.is_match(&tokens[i])
        })
        .map(|i| tokens[i].as_str())
        .collect();
    out.reverse();
    out
}

/// A preposition right after `idx` plus the determiners, nouns and
/// adjectives following it.
fn postmodifiers<'t>(tokens: &'t [String], tags: &[String], idx: usize) -> Vec<&'t str> {
    let next = idx + 1;
    if tags.get(next).map(String::as_str) != Some("IN") {
        return Vec::new();
    }
    let mut out = vec![tokens[next].as_str()];
    out.extend(
        (next + 1..tokens.len())
            .take_while(|&i| tags.get(i).is_some_and(|t| POSTMODIFIER_TAGS.is_match(t)))
            .map(|i| tokens[i].as_str()),
    );
    out
}
