//! Integration tests for the bus client against a stub bridge server.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use agent_comm::bus::{AtomicAction, AtomicActionRequest, Node};
use agent_comm::error::{BusError, Error};

/// Spawn a one-connection stub bridge that answers every `call_service`
/// frame with a `service_response` carrying the given result flag.
async fn spawn_bridge(result: bool, calls: Arc<AtomicUsize>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(socket).await.unwrap();

        while let Some(Ok(message)) = ws.next().await {
            if let Message::Text(text) = message {
                let frame: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(frame["op"], "call_service");
                calls.fetch_add(1, Ordering::SeqCst);

                let reply = json!({
                    "op": "service_response",
                    "id": frame["id"],
                    "service": frame["service"],
                    "values": { "output": "moved" },
                    "result": result,
                });
                ws.send(Message::text(reply.to_string())).await.unwrap();
            }
        }
    });

    format!("ws://{addr}")
}

fn forward_request() -> AtomicActionRequest {
    AtomicActionRequest {
        input: "{\"vel\": 1.0}".to_owned(),
    }
}

#[tokio::test]
async fn single_call_round_trip() {
    let calls = Arc::new(AtomicUsize::new(0));
    let url = spawn_bridge(true, Arc::clone(&calls)).await;

    let node = Node::connect("test_node", &url).await.unwrap();
    assert_eq!(node.name(), "test_node");

    let client = node.service_client::<AtomicAction>("/forward");
    let response = client.call(&forward_request()).await.unwrap();

    assert_eq!(response.output, "moved");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sequential_calls_get_matching_responses() {
    let calls = Arc::new(AtomicUsize::new(0));
    let url = spawn_bridge(true, Arc::clone(&calls)).await;

    let node = Node::connect("test_node", &url).await.unwrap();
    let client = node.service_client::<AtomicAction>("/forward");

    client.call(&forward_request()).await.unwrap();
    client.call(&forward_request()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_call_is_an_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let url = spawn_bridge(false, calls).await;

    let node = Node::connect("test_node", &url).await.unwrap();
    let client = node.service_client::<AtomicAction>("/forward");

    let err = client.call(&forward_request()).await.unwrap_err();
    if let Error::Bus(BusError::Call { service, .. }) = err {
        assert_eq!(service, "/forward");
    } else {
        panic!("expected BusError::Call, got {err:?}");
    }
}

#[tokio::test]
async fn unreachable_bus_is_an_error() {
    let err = Node::connect("test_node", "ws://127.0.0.1:9")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Bus(BusError::Connect { .. })));
}

#[tokio::test]
async fn dropped_session_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept the handshake, then close without ever responding.
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(socket).await.unwrap();
        let _ = ws.next().await;
        let _ = ws.close(None).await;
    });

    let node = Node::connect("test_node", &format!("ws://{addr}"))
        .await
        .unwrap();
    let client = node.service_client::<AtomicAction>("/forward");

    let err = client.call(&forward_request()).await.unwrap_err();
    assert!(matches!(err, Error::Bus(BusError::Closed | BusError::Transport(_))));
}
