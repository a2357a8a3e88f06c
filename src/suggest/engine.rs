//! Suggestion selection
//!
//! Owns the per-session selection state: the prompt pool, the set of
//! trios already shown, the selection counter, and the RNG. All state is
//! session-scoped; `reset` returns the engine to its initial shape.
//!
//! Selection scores unused prompts by token overlap with the last
//! question/answer pair, avoids trios whose entries repeat a subject, and
//! avoids showing the exact same trio twice.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::prompts::PromptPool;
use crate::prompts::matcher::{is_redundant, shared_token_count, tokenize};

/// Maximum number of suggestions offered after an answer.
pub const MAX_SUGGESTIONS: usize = 3;

/// Number of selections between reorderings of the unused pool.
const RESHUFFLE_EVERY: u64 = 6;

pub struct SuggestionEngine {
    catalog: Vec<String>,
    pool: PromptPool,
    shown_trios: HashSet<String>,
    selection_counter: u64,
    rng: StdRng,
}

impl SuggestionEngine {
    /// Creates an engine seeded from the OS.
    pub fn new(catalog: Vec<String>) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Creates an engine with a caller-supplied RNG so tests can pin
    /// tie-breaks and shuffle order.
    pub fn with_rng(catalog: Vec<String>, mut rng: StdRng) -> Self {
        let pool = PromptPool::new(&catalog, &mut rng);
        Self {
            catalog,
            pool,
            shown_trios: HashSet::new(),
            selection_counter: 0,
            rng,
        }
    }

    /// Records a submitted question against the pool: an exact unused
    /// prompt is consumed directly, free text goes through the
    /// equivalence heuristics.
    pub fn note_submission(&mut self, text: &str) {
        if self.pool.contains_unused(text) {
            self.pool.mark_used(text);
        } else {
            self.pool.mark_used_if_equivalent(text);
        }
    }

    /// Picks up to three follow-up prompts for the context of the last
    /// exchange. Called exactly once per finalized message.
    pub fn select_suggestions(&mut self, last_question: &str, last_answer: &str) -> Vec<String> {
        if self.pool.unused_len() == 0 {
            return Vec::new();
        }

        let context = format!("{} {}", last_question, last_answer);
        let context_tokens = tokenize(&context);

        // Score each unused prompt by overlap with the context, then sort
        // best-first with a random nonce breaking ties.
        let mut candidates: Vec<(String, usize, u32)> = self
            .pool
            .unused()
            .iter()
            .map(|p| {
                let prompt_tokens = tokenize(p);
                let score = shared_token_count(&prompt_tokens, &context_tokens);
                (p.clone(), score, 0)
            })
            .collect();
        for candidate in &mut candidates {
            candidate.2 = self.rng.random();
        }
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let mut selected: Vec<String> = Vec::new();

        // Greedy pass over positive scores, skipping prompts redundant
        // with what is already in the trio.
        for (prompt, score, _) in &candidates {
            if selected.len() >= MAX_SUGGESTIONS || *score == 0 {
                break;
            }
            if selected.iter().any(|s| is_redundant(s, prompt)) {
                continue;
            }
            selected.push(prompt.clone());
        }

        // Fill leftover slots from a shuffled pool of the rest. Redundant
        // prompts are accepted only when no non-redundant one remains.
        if selected.len() < MAX_SUGGESTIONS {
            let mut remaining: Vec<String> = self
                .pool
                .unused()
                .iter()
                .filter(|p| !selected.contains(*p))
                .cloned()
                .collect();
            remaining.shuffle(&mut self.rng);

            for prompt in &remaining {
                if selected.len() >= MAX_SUGGESTIONS {
                    break;
                }
                if selected.contains(prompt) {
                    continue;
                }
                if selected.iter().any(|s| is_redundant(s, prompt)) {
                    let alternative_exists = remaining.iter().any(|alt| {
                        !selected.contains(alt)
                            && !selected.iter().any(|s| is_redundant(s, alt))
                    });
                    if alternative_exists {
                        continue;
                    }
                }
                selected.push(prompt.clone());
            }
        }

        // Degenerate pool: take the head of the unused sequence as-is.
        if selected.is_empty() {
            selected = self
                .pool
                .unused()
                .iter()
                .take(MAX_SUGGESTIONS)
                .cloned()
                .collect();
        }

        // Never show the exact same trio twice: on a repeat, try one
        // alternative built from the rest of the pool.
        let key = trio_key(&selected);
        if self.shown_trios.contains(&key) {
            let mut alt_pool: Vec<String> = self
                .pool
                .unused()
                .iter()
                .filter(|p| !selected.contains(*p))
                .cloned()
                .collect();
            if !alt_pool.is_empty() {
                alt_pool.shuffle(&mut self.rng);
                let small_pool = alt_pool.len() <= MAX_SUGGESTIONS;
                let mut alternative: Vec<String> = Vec::new();
                for prompt in &alt_pool {
                    if alternative.len() >= MAX_SUGGESTIONS {
                        break;
                    }
                    let redundant = alternative.iter().any(|s| is_redundant(s, prompt));
                    if !redundant || small_pool {
                        alternative.push(prompt.clone());
                    }
                }
                if !alternative.is_empty() {
                    self.shown_trios.insert(trio_key(&alternative));
                    self.finish_selection();
                    return alternative;
                }
            }
            // No alternative available: accept the repeat.
        }

        self.shown_trios.insert(key);
        self.finish_selection();
        selected
    }

    /// Restores the engine to its session-start state.
    pub fn reset(&mut self) {
        self.pool.reset(&self.catalog, &mut self.rng);
        self.shown_trios.clear();
        self.selection_counter = 0;
    }

    pub fn pool(&self) -> &PromptPool {
        &self.pool
    }

    pub fn selection_count(&self) -> u64 {
        self.selection_counter
    }

    pub fn shown_trio_count(&self) -> usize {
        self.shown_trios.len()
    }

    fn finish_selection(&mut self) {
        self.selection_counter += 1;
        if self.selection_counter % RESHUFFLE_EVERY == 0 {
            self.pool.reshuffle(&mut self.rng);
        }
    }
}

/// Order-independent identity of a trio.
fn trio_key(prompts: &[String]) -> String {
    let mut sorted: Vec<&str> = prompts.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join("||")
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
