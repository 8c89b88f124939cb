use axum::response::IntoResponse;
use prometheus::{Encoder, TextEncoder};

// metrics endpoint (Prometheus text exposition)
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
