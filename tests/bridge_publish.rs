use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::{sleep, Duration};

use authbridge::{
    lifecycle::{self, ReadyWatchdog},
    types::{HostEvent, InputPriority, InputUpdate, UserData},
    AuthBridge, IdentityClient, InputSink,
};

/// Scripted identity endpoint: each call consumes the next outcome.
struct ScriptedClient {
    calls: AtomicUsize,
    outcomes: Vec<Outcome>,
}

enum Outcome {
    Ok(Value),
    Err(String),
    SlowOk(Value, u64),
}

impl ScriptedClient {
    fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcomes,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityClient for ScriptedClient {
    async fn fetch_principal(&self) -> Result<Value> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.get(i) {
            Some(Outcome::Ok(v)) => Ok(v.clone()),
            Some(Outcome::Err(msg)) => Err(anyhow!("{msg}")),
            Some(Outcome::SlowOk(v, delay_ms)) => {
                sleep(Duration::from_millis(*delay_ms)).await;
                Ok(v.clone())
            }
            None => panic!("unexpected fetch call {i}"),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<InputUpdate>>,
}

impl RecordingSink {
    fn updates(&self) -> Vec<InputUpdate> {
        self.published.lock().unwrap().clone()
    }
}

impl InputSink for RecordingSink {
    fn set_input(&self, update: InputUpdate) {
        self.published.lock().unwrap().push(update);
    }
}

fn principal_body(name: &str, user_id: &str) -> Value {
    json!([{
        "user_id": user_id,
        "user_claims": [
            {"typ": "name", "val": name},
            {"typ": "roles", "val": "admin"}
        ]
    }])
}

fn bridge_with(
    outcomes: Vec<Outcome>,
) -> (Arc<AuthBridge>, Arc<ScriptedClient>, Arc<RecordingSink>) {
    let client = Arc::new(ScriptedClient::new(outcomes));
    let sink = Arc::new(RecordingSink::default());
    let bridge = Arc::new(AuthBridge::new(client.clone(), sink.clone()));
    (bridge, client, sink)
}

#[tokio::test]
async fn success_publishes_extracted_claims_once() {
    let (bridge, _client, sink) = bridge_with(vec![Outcome::Ok(principal_body("Ada", "abc123"))]);
    bridge.fetch_and_publish().await;

    let updates = sink.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].key, "AzureAuth");
    assert_eq!(updates[0].priority, InputPriority::Event);
    assert_eq!(
        updates[0].value,
        json!({
            "name": "Ada",
            "preferred_username": "unknown",
            "user_id": "abc123",
            "roles": ["admin"]
        })
    );
}

#[tokio::test]
async fn failure_publishes_defaults_once() {
    let (bridge, _client, sink) = bridge_with(vec![Outcome::Err("connection refused".into())]);
    bridge.fetch_and_publish().await;

    let updates = sink.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].value, json!(UserData::unknown()));
}

#[tokio::test]
async fn each_connected_signal_fetches_and_publishes() {
    let (bridge, client, sink) = bridge_with(vec![
        Outcome::Ok(principal_body("First", "u1")),
        Outcome::Ok(principal_body("Second", "u2")),
    ]);

    let (host_tx, host_rx) = unbounded_channel::<HostEvent>();
    let loop_task = tokio::spawn(lifecycle::run(bridge, host_rx, None));

    // Nothing may publish before the host signals readiness.
    sleep(Duration::from_millis(50)).await;
    assert!(sink.updates().is_empty());

    let _ = host_tx.send(HostEvent::Connected);
    let _ = host_tx.send(HostEvent::Connected);
    let _ = host_tx.send(HostEvent::Shutdown);
    loop_task.await.unwrap().unwrap();

    // Fetch tasks are spawned; give them a moment to settle.
    for _ in 0..50 {
        if sink.updates().len() == 2 {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(client.call_count(), 2);
    assert_eq!(sink.updates().len(), 2);
}

#[tokio::test]
async fn stale_result_does_not_overwrite_newer_one() {
    // First fetch is slow and settles after the second; its result must be
    // dropped rather than clobbering the newer value.
    let (bridge, _client, sink) = bridge_with(vec![
        Outcome::SlowOk(principal_body("Old", "u1"), 150),
        Outcome::Ok(principal_body("New", "u2")),
    ]);

    let first = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.fetch_and_publish().await })
    };
    sleep(Duration::from_millis(30)).await;
    let second = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.fetch_and_publish().await })
    };

    first.await.unwrap();
    second.await.unwrap();

    let updates = sink.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].value["name"], "New");
}

#[tokio::test]
async fn watchdog_is_disarmed_by_connected_signal() {
    // Smoke test: arming then connecting must not warn or panic; the loop
    // shuts down cleanly with the watchdog consumed.
    let (bridge, _client, _sink) = bridge_with(vec![Outcome::Ok(principal_body("Ada", "u1"))]);

    let (host_tx, host_rx) = unbounded_channel::<HostEvent>();
    let watchdog = ReadyWatchdog::arm(60_000);
    let loop_task = tokio::spawn(lifecycle::run(bridge, host_rx, Some(watchdog)));

    let _ = host_tx.send(HostEvent::Connected);
    let _ = host_tx.send(HostEvent::Shutdown);
    loop_task.await.unwrap().unwrap();
}
