//! Tests for the ask worker thread

use super::*;
use std::sync::mpsc;

fn unreachable_client() -> AskClient {
    // Nothing listens on the discard port; the connect fails fast
    AskClient::new(
        "http://127.0.0.1:9".to_string(),
        "test".to_string(),
        "anonymous".to_string(),
    )
}

#[test]
fn test_worker_reports_transport_failure() {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(unreachable_client(), request_rx, response_tx);

    request_tx
        .send(AskRequest::Ask {
            question: "hello".to_string(),
            request_id: 1,
            cancel_token: CancellationToken::new(),
        })
        .unwrap();

    match response_rx.recv().unwrap() {
        AskResponse::Failed { request_id, .. } => assert_eq!(request_id, 1),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_worker_honors_pre_cancelled_request() {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(unreachable_client(), request_rx, response_tx);

    let cancel_token = CancellationToken::new();
    cancel_token.cancel();

    request_tx
        .send(AskRequest::Ask {
            question: "hello".to_string(),
            request_id: 7,
            cancel_token,
        })
        .unwrap();

    assert!(matches!(
        response_rx.recv().unwrap(),
        AskResponse::Cancelled { request_id: 7 }
    ));
}

#[test]
fn test_worker_processes_requests_in_order() {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(unreachable_client(), request_rx, response_tx);

    for request_id in [1, 2, 3] {
        request_tx
            .send(AskRequest::Ask {
                question: "q".to_string(),
                request_id,
                cancel_token: CancellationToken::new(),
            })
            .unwrap();
    }

    for expected in [1, 2, 3] {
        match response_rx.recv().unwrap() {
            AskResponse::Failed { request_id, .. } => assert_eq!(request_id, expected),
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}

#[test]
fn test_worker_shuts_down_when_channel_closed() {
    let (request_tx, request_rx) = mpsc::channel::<AskRequest>();
    let (response_tx, _response_rx) = mpsc::channel();

    let handle = std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");
        rt.block_on(worker_loop(unreachable_client(), request_rx, response_tx));
    });

    // Drop the sender to close the channel
    drop(request_tx);

    handle.join().expect("worker loop should exit cleanly");
}

#[test]
fn test_cancellation_token_is_idempotent() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());

    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}
