//! Tests for the reveal state machine

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{REVEAL_STEP, StreamController};
use crate::chat::{MessageState, MessageStore};
use crate::suggest::SuggestionEngine;

fn test_engine() -> SuggestionEngine {
    let catalog = vec![
        "Stellar observations".to_string(),
        "Python programming".to_string(),
        "Leadership experience".to_string(),
        "Academic background".to_string(),
    ];
    SuggestionEngine::with_rng(catalog, StdRng::seed_from_u64(99))
}

fn setup() -> (MessageStore, SuggestionEngine, StreamController, u64) {
    let mut store = MessageStore::new();
    store.push_user("question");
    let placeholder_id = store.push_placeholder();
    (store, test_engine(), StreamController::new(), placeholder_id)
}

#[test]
fn test_start_sets_revealing() {
    let (mut store, mut engine, mut stream, id) = setup();
    stream.start(&mut store, &mut engine, id, "question", "full answer");

    let message = store.get(id).unwrap();
    assert_eq!(message.state, MessageState::Revealing);
    assert_eq!(message.revealed, 0);
    assert_eq!(message.text.as_deref(), Some("full answer"));
    assert!(stream.is_active());
}

#[test]
fn test_reveal_completes_in_ceil_ticks() {
    let (mut store, mut engine, mut stream, id) = setup();
    let text = "hello"; // 5 chars
    stream.start(&mut store, &mut engine, id, "question", text);

    let expected_ticks = text.chars().count().div_ceil(REVEAL_STEP);
    let mut ticks = 0;
    let mut last_revealed = 0;
    while stream.is_active() {
        stream.tick(&mut store, &mut engine);
        ticks += 1;
        let revealed = store.get(id).unwrap().revealed;
        assert!(revealed >= last_revealed, "revealed length regressed");
        last_revealed = revealed;
        assert!(ticks <= 100, "reveal never completed");
    }

    assert_eq!(ticks, expected_ticks);
    let message = store.get(id).unwrap();
    assert_eq!(message.state, MessageState::Completed);
    assert_eq!(message.revealed, 5);
}

#[test]
fn test_completion_attaches_suggestions_once() {
    let (mut store, mut engine, mut stream, id) = setup();
    stream.start(&mut store, &mut engine, id, "about python", "python everywhere");

    while stream.is_active() {
        stream.tick(&mut store, &mut engine);
    }

    let message = store.get(id).unwrap();
    assert!(!message.suggestions.is_empty());
    assert_eq!(engine.selection_count(), 1);

    // Further ticks and stops are no-ops
    assert!(!stream.tick(&mut store, &mut engine));
    assert!(!stream.stop(&mut store, &mut engine));
    assert_eq!(engine.selection_count(), 1);
}

#[test]
fn test_stop_freezes_prefix_and_finalizes() {
    let (mut store, mut engine, mut stream, id) = setup();
    stream.start(&mut store, &mut engine, id, "question", "a long answer text");

    stream.tick(&mut store, &mut engine);
    stream.tick(&mut store, &mut engine);
    let revealed_at_stop = store.get(id).unwrap().revealed;
    assert_eq!(revealed_at_stop, 2 * REVEAL_STEP);

    assert!(stream.stop(&mut store, &mut engine));
    let message = store.get(id).unwrap();
    assert_eq!(message.state, MessageState::Stopped);
    assert_eq!(message.revealed, revealed_at_stop);
    assert_eq!(engine.selection_count(), 1);

    // Repeated stop is a no-op and nothing moves afterwards
    assert!(!stream.stop(&mut store, &mut engine));
    assert!(!stream.tick(&mut store, &mut engine));
    assert_eq!(store.get(id).unwrap().revealed, revealed_at_stop);
    assert_eq!(engine.selection_count(), 1);
}

#[test]
fn test_new_start_supersedes_active_reveal() {
    let (mut store, mut engine, mut stream, first_id) = setup();
    stream.start(&mut store, &mut engine, first_id, "question", "first answer");
    stream.tick(&mut store, &mut engine);

    store.push_user("another question");
    let second_id = store.push_placeholder();
    stream.start(&mut store, &mut engine, second_id, "another question", "second answer");

    assert_eq!(stream.active_message_id(), Some(second_id));

    while stream.is_active() {
        stream.tick(&mut store, &mut engine);
    }

    // The superseded message is frozen: not terminal, no suggestions
    let first = store.get(first_id).unwrap();
    assert_eq!(first.state, MessageState::Revealing);
    assert_eq!(first.revealed, REVEAL_STEP);
    assert!(first.suggestions.is_empty());

    let second = store.get(second_id).unwrap();
    assert_eq!(second.state, MessageState::Completed);
    assert!(!second.suggestions.is_empty());
}

#[test]
fn test_empty_text_completes_without_ticks() {
    let (mut store, mut engine, mut stream, id) = setup();
    stream.start(&mut store, &mut engine, id, "question", "");

    assert!(!stream.is_active());
    let message = store.get(id).unwrap();
    assert_eq!(message.state, MessageState::Completed);
    assert_eq!(message.revealed, 0);
    assert_eq!(engine.selection_count(), 1);
}

#[test]
fn test_cancel_leaves_message_untouched() {
    let (mut store, mut engine, mut stream, id) = setup();
    stream.start(&mut store, &mut engine, id, "question", "some answer");
    stream.tick(&mut store, &mut engine);

    stream.cancel();
    assert!(!stream.is_active());

    let message = store.get(id).unwrap();
    assert_eq!(message.state, MessageState::Revealing);
    assert!(message.suggestions.is_empty());
    assert_eq!(engine.selection_count(), 0);
}

#[test]
fn test_multibyte_answer_reveals_whole_chars() {
    let (mut store, mut engine, mut stream, id) = setup();
    let text = "héllo wörld"; // 11 chars, more bytes
    stream.start(&mut store, &mut engine, id, "question", text);

    stream.tick(&mut store, &mut engine);
    let message = store.get(id).unwrap();
    assert_eq!(message.visible_text(), "hé");

    while stream.is_active() {
        stream.tick(&mut store, &mut engine);
    }
    assert_eq!(store.get(id).unwrap().visible_text(), text);
}
