mod engine;

pub use engine::{MAX_SUGGESTIONS, SuggestionEngine};
