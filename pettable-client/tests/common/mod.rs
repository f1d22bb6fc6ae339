//! Shared test helpers for client tests.

#![allow(dead_code)]

use pettable_client::{ChannelNotifier, Notification, PageFetcher, TableConfig};
use pettable_types::Record;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::MockServer;

/// Config pointing every endpoint at the mock server.
pub fn mock_config(server: &MockServer) -> TableConfig {
    TableConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    }
}

/// Fetcher over the mock server plus the receiving end of its notifications.
pub fn mock_fetcher(server: &MockServer) -> (PageFetcher, UnboundedReceiver<Notification>) {
    let (notifier, rx) = ChannelNotifier::new();
    let fetcher = PageFetcher::new(mock_config(server), Arc::new(notifier)).unwrap();
    (fetcher, rx)
}

/// Collects every notification delivered so far.
pub fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}

pub fn pet(id: u64, name: &str, owner: u64, visit: u64) -> Value {
    json!({
        "Pet_id": id,
        "PetName": name,
        "PetGender": "F",
        "Breed": "Collie",
        "PetOwns": owner,
        "PetVisits": visit
    })
}

pub fn as_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// Protocol listing envelope.
pub fn listing(items: Vec<Value>) -> Value {
    json!({ "value": items })
}
