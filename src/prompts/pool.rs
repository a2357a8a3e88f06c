//! Prompt pool partitioning
//!
//! Tracks which catalog prompts have been effectively asked. Every prompt
//! is in exactly one of two places: the shuffled `unused` sequence or the
//! `used` set. Order of `unused` only affects tie-breaks and fallback
//! selection downstream, never membership.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::matcher::{shared_token_count, tokenize};

pub struct PromptPool {
    unused: Vec<String>,
    used: HashSet<String>,
}

impl PromptPool {
    /// Creates a pool with the full catalog unused, in shuffled order.
    pub fn new(catalog: &[String], rng: &mut impl Rng) -> Self {
        let mut unused = catalog.to_vec();
        unused.shuffle(rng);
        Self {
            unused,
            used: HashSet::new(),
        }
    }

    /// Moves a prompt from unused to used. Idempotent: already-used or
    /// unknown prompts are a no-op.
    pub fn mark_used(&mut self, prompt: &str) {
        if let Some(pos) = self.unused.iter().position(|p| p.as_str() == prompt) {
            let prompt = self.unused.remove(pos);
            self.used.insert(prompt);
        }
    }

    /// Marks every unused prompt that a free-text query effectively asked.
    ///
    /// Three heuristics, any of which counts as a match: the lowercased
    /// prompt appears verbatim in the text, every prompt token appears
    /// among the text tokens, or the two share at least one token.
    /// Intentionally permissive; a single common token can match.
    pub fn mark_used_if_equivalent(&mut self, free_text: &str) {
        let text = free_text.to_lowercase();
        let text_tokens = tokenize(&text);

        let mut remaining = Vec::with_capacity(self.unused.len());
        for prompt in self.unused.drain(..) {
            let normalized = prompt.to_lowercase();
            let prompt_tokens = tokenize(&normalized);

            let phrase_match = text.contains(&normalized);
            let all_tokens_in_text = prompt_tokens
                .iter()
                .all(|t| text_tokens.contains(t));
            let some_overlap = shared_token_count(&prompt_tokens, &text_tokens) >= 1;

            if phrase_match || all_tokens_in_text || some_overlap {
                self.used.insert(prompt);
            } else {
                remaining.push(prompt);
            }
        }
        self.unused = remaining;
    }

    /// Restores the full catalog as unused, freshly shuffled.
    pub fn reset(&mut self, catalog: &[String], rng: &mut impl Rng) {
        self.unused = catalog.to_vec();
        self.unused.shuffle(rng);
        self.used.clear();
    }

    /// Reorders `unused` without changing membership.
    pub fn reshuffle(&mut self, rng: &mut impl Rng) {
        self.unused.shuffle(rng);
    }

    pub fn contains_unused(&self, prompt: &str) -> bool {
        self.unused.iter().any(|p| p.as_str() == prompt)
    }

    pub fn unused(&self) -> &[String] {
        &self.unused
    }

    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }

    pub fn unused_len(&self) -> usize {
        self.unused.len()
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod pool_tests;
