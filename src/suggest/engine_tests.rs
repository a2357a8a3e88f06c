//! Tests for suggestion selection

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{MAX_SUGGESTIONS, SuggestionEngine};

fn catalog(prompts: &[&str]) -> Vec<String> {
    prompts.iter().map(|p| p.to_string()).collect()
}

fn seeded_engine(prompts: &[&str], seed: u64) -> SuggestionEngine {
    SuggestionEngine::with_rng(catalog(prompts), StdRng::seed_from_u64(seed))
}

/// A catalog of mutually non-redundant prompts (no shared tokens > 2 chars).
const DISTINCT_CATALOG: [&str; 8] = [
    "Stellar observations",
    "Python programming",
    "Leadership experience",
    "Academic background",
    "Communication skills",
    "Awards earned",
    "Internship summary",
    "Publication record",
];

#[test]
fn test_selection_is_bounded_and_from_unused() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 11);
    let trio = engine.select_suggestions("tell me about python", "Python is used throughout.");

    assert!(trio.len() <= MAX_SUGGESTIONS);
    assert!(!trio.is_empty());
    for prompt in &trio {
        assert!(engine.pool().contains_unused(prompt));
    }

    let distinct: HashSet<&String> = trio.iter().collect();
    assert_eq!(distinct.len(), trio.len());
}

#[test]
fn test_context_match_is_selected() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 11);
    let trio = engine.select_suggestions(
        "what programming languages do you know",
        "Mostly python for scientific work.",
    );
    assert!(trio.contains(&"Python programming".to_string()));
}

#[test]
fn test_empty_pool_returns_empty() {
    let mut engine = seeded_engine(&["Python programming"], 11);
    engine.note_submission("Python programming");
    assert_eq!(engine.pool().unused_len(), 0);
    assert!(engine.select_suggestions("anything", "at all").is_empty());
}

#[test]
fn test_selected_trio_avoids_redundancy() {
    // Three prompts share "research"; only one of them may appear
    let mut engine = seeded_engine(
        &[
            "Research projects",
            "Research motivation",
            "Research exposure",
            "Python programming",
            "Leadership experience",
        ],
        23,
    );
    let trio = engine.select_suggestions("tell me about your research", "Lots of research.");
    let research_count = trio.iter().filter(|p| p.contains("Research")).count();
    assert_eq!(research_count, 1);
    assert_eq!(trio.len(), MAX_SUGGESTIONS);
}

#[test]
fn test_small_pool_returns_what_exists() {
    let mut engine = seeded_engine(&["Stellar observations", "Python programming"], 5);
    let trio = engine.select_suggestions("", "");
    assert_eq!(trio.len(), 2);
}

#[test]
fn test_repeat_trio_accepted_when_no_alternative() {
    // With exactly three prompts the same trio is unavoidable
    let mut engine = seeded_engine(
        &["Stellar observations", "Python programming", "Awards earned"],
        5,
    );
    let first: HashSet<String> = engine.select_suggestions("", "").into_iter().collect();
    let second: HashSet<String> = engine.select_suggestions("", "").into_iter().collect();
    assert_eq!(first, second);
}

#[test]
fn test_selection_counter_increments() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 5);
    assert_eq!(engine.selection_count(), 0);
    engine.select_suggestions("", "");
    assert_eq!(engine.selection_count(), 1);
    engine.select_suggestions("", "");
    assert_eq!(engine.selection_count(), 2);
}

#[test]
fn test_trio_history_grows() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 5);
    engine.select_suggestions("", "");
    assert_eq!(engine.shown_trio_count(), 1);
    engine.select_suggestions("", "");
    assert!(engine.shown_trio_count() >= 1);
}

#[test]
fn test_periodic_reshuffle_preserves_membership() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 42);

    for _ in 0..5 {
        engine.select_suggestions("", "");
    }
    let before: HashSet<String> = engine.pool().unused().iter().cloned().collect();

    // Sixth selection triggers the reorder
    engine.select_suggestions("", "");
    assert_eq!(engine.selection_count(), 6);

    let after: HashSet<String> = engine.pool().unused().iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_note_submission_exact_match() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 7);
    engine.note_submission("Stellar observations");
    assert!(engine.pool().used().contains("Stellar observations"));
    // Exact consumption must not heuristically mark unrelated prompts
    assert_eq!(engine.pool().used().len(), 1);
}

#[test]
fn test_note_submission_free_text() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 7);
    engine.note_submission("Tell me about your machine learning work details");
    // No catalog entry matches these tokens
    assert!(engine.pool().used().is_empty());

    engine.note_submission("how are your communication skills");
    assert!(engine.pool().used().contains("Communication skills"));
}

#[test]
fn test_reset_restores_initial_state() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 9);
    engine.note_submission("Python programming");
    engine.select_suggestions("python", "answer text");
    assert!(engine.selection_count() > 0);

    engine.reset();
    assert_eq!(engine.pool().unused_len(), DISTINCT_CATALOG.len());
    assert!(engine.pool().used().is_empty());
    assert_eq!(engine.selection_count(), 0);
    assert_eq!(engine.shown_trio_count(), 0);
}

#[test]
fn test_selection_never_returns_used_prompts() {
    let mut engine = seeded_engine(&DISTINCT_CATALOG, 13);
    engine.note_submission("Python programming");
    engine.note_submission("Awards earned");

    for _ in 0..4 {
        let trio = engine.select_suggestions("background", "details");
        assert!(!trio.contains(&"Python programming".to_string()));
        assert!(!trio.contains(&"Awards earned".to_string()));
    }
}
