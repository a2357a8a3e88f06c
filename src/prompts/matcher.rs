//! Token heuristics shared by prompt marking and suggestion scoring
//!
//! All comparisons work on lowercased word-character tokens. Punctuation
//! acts as a separator; single-character tokens are kept.

use std::collections::HashSet;

/// Tokens must be longer than this to count toward redundancy. Short
/// tokens ("a", "of", "my") are connective noise and never make two
/// prompts redundant.
const REDUNDANCY_MIN_LEN: usize = 2;

/// Splits text into lowercased tokens: maximal runs of alphanumeric
/// characters or underscores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts how many `probe` tokens appear in `reference`, with multiplicity
/// on the probe side. Repeated probe tokens count once each.
pub fn shared_token_count(reference: &[String], probe: &[String]) -> usize {
    let reference: HashSet<&str> = reference.iter().map(String::as_str).collect();
    probe
        .iter()
        .filter(|t| reference.contains(t.as_str()))
        .count()
}

/// Two prompts are redundant when they share any token longer than two
/// characters, so a trio never repeats the same subject twice.
pub fn is_redundant(a: &str, b: &str) -> bool {
    let a_tokens: Vec<String> = tokenize(a)
        .into_iter()
        .filter(|t| t.chars().count() > REDUNDANCY_MIN_LEN)
        .collect();
    let b_tokens: Vec<String> = tokenize(b)
        .into_iter()
        .filter(|t| t.chars().count() > REDUNDANCY_MIN_LEN)
        .collect();
    shared_token_count(&a_tokens, &b_tokens) > 0
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod matcher_tests;
