//! End-to-end escalator tests over real TCP.

use strange_errors_server::escalator::TERMINATION_EXIT_CODE;

mod common;

#[tokio::test]
async fn test_five_calls_then_overloaded() {
    let server = common::start_server(|_| {}).await;
    assert!(server.db_path.exists());

    let mut statuses = Vec::new();
    let mut labels = Vec::new();
    for _ in 0..6 {
        let reply = server.client.goat().await.expect("server unreachable");
        statuses.push(reply.status);
        labels.push(reply.field("status").unwrap().to_string());
        assert!(reply.field("message").is_some(), "body: {}", reply.body);
    }

    assert_eq!(statuses, vec![200, 400, 400, 500, 503, 500]);
    assert_eq!(
        labels,
        vec!["OK", "Annoyed", "Upset", "Enraged", "Fatal", "Overloaded"]
    );
    assert!(!server.db_path.exists(), "fourth call should delete the store file");
    assert_eq!(server.invocation_count(), 6);

    server.wait_for_terminations().await;
    assert_eq!(
        server.terminator.fired(),
        vec![TERMINATION_EXIT_CODE, TERMINATION_EXIT_CODE]
    );
}

#[tokio::test]
async fn test_missing_store_file_reports_failed() {
    let server = common::start_server(|_| {}).await;

    for _ in 0..3 {
        server.client.goat().await.unwrap();
    }
    std::fs::remove_file(&server.db_path).unwrap();

    let reply = server.client.goat().await.unwrap();
    assert_eq!(reply.status, 500);
    assert_eq!(reply.field("status"), Some("Failed"));
    assert_eq!(
        reply.field("message"),
        Some("I tried to delete the database, but it was already gone.")
    );
}

#[tokio::test]
async fn test_termination_scheduled_on_every_call_from_five() {
    let server = common::start_server(|_| {}).await;

    for n in 1..=10 {
        let reply = server.client.goat().await.unwrap();
        match n {
            5 => assert_eq!(reply.status, 503),
            6..=10 => {
                assert_eq!(reply.status, 500);
                assert_eq!(reply.field("status"), Some("Overloaded"));
            }
            _ => {}
        }
    }

    server.wait_for_terminations().await;
    assert_eq!(server.terminator.fired(), vec![TERMINATION_EXIT_CODE; 6]);
}

#[tokio::test]
async fn test_get_health_check_does_not_escalate() {
    let server = common::start_server(|_| {}).await;

    for _ in 0..3 {
        let reply = server.client.health_check().await.unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.field("status"), Some("OK"));
        assert!(reply.field("timestamp").is_some());
    }

    let reply = server.client.goat().await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(server.invocation_count(), 1);
}

#[tokio::test]
async fn test_custom_verb() {
    let server = common::start_server(|config| {
        config.routing.escalator_verb = "BAA".to_string();
    })
    .await;

    let reply = server.client.goat().await.unwrap();
    assert_eq!(reply.status, 200);

    let reply = server
        .client
        .request("GOAT", "/api/health-check", None)
        .await
        .unwrap();
    assert_eq!(reply.status, 405);
    assert_eq!(server.invocation_count(), 1);
}

#[tokio::test]
async fn test_custom_health_check_path() {
    let server = common::start_server(|config| {
        config.routing.health_check_path = "/ping".to_string();
    })
    .await;

    let reply = server.client.health_check().await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.field("status"), Some("OK"));

    let reply = server.client.goat().await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(server.invocation_count(), 1);

    let reply = server
        .client
        .request("GOAT", "/api/health-check", None)
        .await
        .unwrap();
    assert_eq!(reply.field("error"), Some("Route not found"));
    assert_eq!(server.invocation_count(), 1);
}

#[tokio::test]
async fn test_oversized_body_does_not_block_escalator() {
    let server = common::start_server(|config| {
        config.limits.max_body_bytes = 16;
    })
    .await;

    let resp = reqwest::Client::new()
        .request(
            reqwest::Method::from_bytes(b"GOAT").unwrap(),
            format!("{}/api/health-check", server.url),
        )
        .body("x".repeat(64))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(server.invocation_count(), 1);
}
