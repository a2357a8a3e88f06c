//! Ask worker thread
//!
//! Handles answer-service requests in a background thread so the UI never
//! blocks on the network. Receives requests via channel, makes the HTTP
//! call with cancellation support, and sends the outcome back.
//!
//! Uses a single-threaded tokio runtime; blocking `recv()` on the request
//! channel is fine in a dedicated thread.

use std::sync::mpsc::{Receiver, Sender};

use tokio_util::sync::CancellationToken;

use super::client::{AskClient, ServiceError};

/// Request messages sent to the ask worker thread
#[derive(Debug)]
pub enum AskRequest {
    Ask {
        question: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
        /// Token to abort the HTTP call
        cancel_token: CancellationToken,
    },
}

/// Response messages received from the ask worker thread
#[derive(Debug)]
pub enum AskResponse {
    /// The service produced answer text (possibly the no-answer sentinel)
    Answer { request_id: u64, text: String },
    /// The call did not complete; no usable answer context exists
    Failed { request_id: u64, error: String },
    /// The request was cancelled before producing a result
    Cancelled { request_id: u64 },
}

/// Spawns the ask worker thread.
pub fn spawn_worker(
    client: AskClient,
    request_rx: Receiver<AskRequest>,
    response_tx: Sender<AskResponse>,
) {
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        rt.block_on(worker_loop(client, request_rx, response_tx));
    });
}

/// Processes requests until the request channel is closed.
async fn worker_loop(
    client: AskClient,
    request_rx: Receiver<AskRequest>,
    response_tx: Sender<AskResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        match request {
            AskRequest::Ask {
                question,
                request_id,
                cancel_token,
            } => {
                handle_ask(&client, &question, request_id, cancel_token, &response_tx).await;
            }
        }
    }
}

async fn handle_ask(
    client: &AskClient,
    question: &str,
    request_id: u64,
    cancel_token: CancellationToken,
    response_tx: &Sender<AskResponse>,
) {
    if cancel_token.is_cancelled() {
        let _ = response_tx.send(AskResponse::Cancelled { request_id });
        return;
    }

    match client.ask_with_cancel(question, &cancel_token).await {
        Ok(text) => {
            let _ = response_tx.send(AskResponse::Answer { request_id, text });
        }
        Err(ServiceError::Cancelled) => {
            log::debug!("request {} cancelled", request_id);
            let _ = response_tx.send(AskResponse::Cancelled { request_id });
        }
        Err(e) => {
            let _ = response_tx.send(AskResponse::Failed {
                request_id,
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
