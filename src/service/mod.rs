//! Answer service integration
//!
//! The HTTP client for the hosted ask endpoint plus the background worker
//! thread that keeps network calls off the UI thread.

mod client;
pub mod worker;

pub use client::{AskClient, NO_ANSWER_FALLBACK, ServiceError};
pub use worker::{AskRequest, AskResponse, spawn_worker};
