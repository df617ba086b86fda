//! Concurrent escalator invocations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use strange_errors_server::config::CounterDiscipline;
use strange_errors_server::escalator::{Escalator, RacyCounter};
use strange_errors_server::store::SqliteStore;

mod common;

const CALLERS: usize = 40;

async fn fire_concurrently(server: &common::TestServer) -> Vec<(u16, String)> {
    let mut handles = Vec::with_capacity(CALLERS);
    for _ in 0..CALLERS {
        let client = server.client.clone();
        handles.push(tokio::spawn(async move {
            let reply = client.goat().await.expect("request failed");
            let label = reply
                .field("status")
                .expect("escalator body has a status label")
                .to_string();
            assert!(reply.field("message").is_some(), "malformed body: {}", reply.body);
            (reply.status, label)
        }));
    }

    let mut results = Vec::with_capacity(CALLERS);
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serialized_counter_sees_every_call() {
    let server = common::start_server(|_| {}).await;

    let results = fire_concurrently(&server).await;
    assert_eq!(server.invocation_count(), CALLERS as u64);

    let mut by_label: HashMap<String, usize> = HashMap::new();
    for (_, label) in &results {
        *by_label.entry(label.clone()).or_default() += 1;
    }

    // Each n in 1..=5 is observed exactly once; the rest are overloaded.
    for label in ["OK", "Annoyed", "Upset", "Enraged", "Fatal"] {
        assert_eq!(by_label.get(label), Some(&1), "label {label}: {by_label:?}");
    }
    assert_eq!(by_label.get("Overloaded"), Some(&(CALLERS - 5)));
    assert!(!server.db_path.exists());

    server.wait_for_terminations().await;
    assert_eq!(server.terminator.fired().len(), CALLERS - 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racy_counter_still_answers_every_call() {
    let server = common::start_server(|config| {
        config.escalator.counter = CounterDiscipline::Racy;
    })
    .await;

    let results = fire_concurrently(&server).await;
    assert_eq!(results.len(), CALLERS);

    let known = ["OK", "Annoyed", "Upset", "Enraged", "Failed", "Fatal", "Overloaded"];
    for (status, label) in &results {
        assert!(known.contains(&label.as_str()), "unexpected label {label}");
        assert!(matches!(status, 200 | 400 | 500 | 503));
    }

    let count = server.invocation_count();
    assert!(count >= 1 && count <= CALLERS as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racy_counter_in_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = strange_errors_server::ServerConfig::default();
    config.database.path = dir.path().join("racy.db").to_string_lossy().into_owned();
    let store = SqliteStore::open(&config.database).await.unwrap();

    let escalator = Arc::new(Escalator::new(
        Arc::new(RacyCounter::default()),
        Arc::new(store),
        Duration::from_millis(1),
    ));

    let mut handles = Vec::new();
    for _ in 0..CALLERS {
        let escalator = escalator.clone();
        handles.push(tokio::spawn(async move { escalator.invoke().await }));
    }
    for handle in handles {
        let invocation = handle.await.unwrap();
        assert!(invocation.count >= 1);
        assert_eq!(invocation.termination.is_some(), invocation.count >= 5);
    }

    let count = escalator.count();
    assert!(count >= 1 && count <= CALLERS as u64);
}
