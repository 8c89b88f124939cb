use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tripotter_gate::create_router;
use tripotter_gate::gate::AdmissionGate;
use tripotter_gate::state::AppState;

async fn spawn_app(capacity: u32, refill_interval: Duration) -> String {
    let state = Arc::new(AppState {
        gate: AdmissionGate::new(capacity, refill_interval),
    });

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client() -> Client {
    Client::new()
}

async fn admit(base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client()
        .post(format!("{}/api/admit", base_url))
        .json(&body)
        .send()
        .await
        .expect("Failed to send admit request")
}

#[tokio::test]
async fn health_returns_ok() {
    let base_url = spawn_app(3, Duration::from_secs(180)).await;

    let resp = client()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn first_call_is_admitted() {
    let base_url = spawn_app(3, Duration::from_secs(180)).await;

    let resp = admit(&base_url, serde_json::json!({ "user_id": "u2" })).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["allowed"], true);
    assert_eq!(body["remaining"], 2);
}

#[tokio::test]
async fn burst_beyond_capacity_gets_429() {
    let base_url = spawn_app(3, Duration::from_secs(180)).await;

    for _ in 0..3 {
        let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
        assert_eq!(resp.status(), 200);
    }

    let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
    assert_eq!(resp.status(), 429);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Rate limit exceeded. Try again later.");
}

#[tokio::test]
async fn missing_identity_gets_400() {
    let base_url = spawn_app(3, Duration::from_secs(180)).await;

    let resp = admit(&base_url, serde_json::json!({})).await;
    assert_eq!(resp.status(), 400);

    let resp = admit(&base_url, serde_json::json!({ "user_id": "" })).await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn distinct_callers_have_distinct_budgets() {
    let base_url = spawn_app(1, Duration::from_secs(180)).await;

    let resp = admit(&base_url, serde_json::json!({ "user_id": "alice" })).await;
    assert_eq!(resp.status(), 200);
    let resp = admit(&base_url, serde_json::json!({ "user_id": "alice" })).await;
    assert_eq!(resp.status(), 429);

    // bob is unaffected by alice's drained bucket
    let resp = admit(&base_url, serde_json::json!({ "user_id": "bob" })).await;
    assert_eq!(resp.status(), 200);

    // so is an ip-keyed caller
    let resp = admit(&base_url, serde_json::json!({ "client_ip": "10.0.0.7" })).await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn scopes_have_separate_budgets() {
    let base_url = spawn_app(1, Duration::from_secs(180)).await;

    let resp = admit(
        &base_url,
        serde_json::json!({ "user_id": "u1", "scope": "post" }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let resp = admit(
        &base_url,
        serde_json::json!({ "user_id": "u1", "scope": "post" }),
    )
    .await;
    assert_eq!(resp.status(), 429);

    let resp = admit(
        &base_url,
        serde_json::json!({ "user_id": "u1", "scope": "ai_suggest" }),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn drained_key_recovers_after_refill_interval() {
    // millisecond-scale interval so the round trip stays fast
    let base_url = spawn_app(1, Duration::from_millis(200)).await;

    let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
    assert_eq!(resp.status(), 200);
    let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
    assert_eq!(resp.status(), 429);

    tokio::time::sleep(Duration::from_millis(250)).await;

    let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
    assert_eq!(resp.status(), 200);
    let resp = admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;
    assert_eq!(resp.status(), 429);
}

#[tokio::test]
async fn metrics_expose_gate_counters() {
    let base_url = spawn_app(3, Duration::from_secs(180)).await;

    admit(&base_url, serde_json::json!({ "user_id": "u1" })).await;

    let resp = client()
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("gate_requests_total"));
    assert!(body.contains("gate_admitted_total"));
}
