mod controller;

pub use controller::{REVEAL_INTERVAL, REVEAL_STEP, StreamController};
