use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;
use crate::errors::ApiError;
use crate::keys;
use crate::metrics::{ADMITTED_TOTAL, DECISION_LATENCY, DENIED_TOTAL, REQUEST_TOTAL, TRACKED_KEYS};
use crate::models::{AdmitRequest, AdmitResponse};
use crate::state::AppState;

// Preflight check: derive the caller's bucket key, ask the gate, and turn a
// deny into the 429 the gate itself never produces.
pub async fn admit_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdmitRequest>,
) -> Result<Json<AdmitResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    let identity = keys::resolve_identity(&payload)
        .ok_or_else(|| ApiError::BadRequest("user_id or client_ip required".to_string()))?;
    let scope = payload.scope.as_deref().unwrap_or(keys::DEFAULT_SCOPE);
    let key = keys::bucket_key(scope, &identity);

    let start = Instant::now();
    let allowed = state.gate.try_admit(&key, start);
    DECISION_LATENCY.observe(start.elapsed().as_secs_f64());
    TRACKED_KEYS.set(state.gate.tracked_keys() as f64);

    if !allowed {
        DENIED_TOTAL.inc();
        return Err(ApiError::TooManyRequests(
            "Rate limit exceeded. Try again later.".to_string(),
        ));
    }

    ADMITTED_TOTAL.inc();
    let remaining = state.gate.remaining(&key).unwrap_or(0);
    Ok(Json(AdmitResponse {
        allowed: true,
        remaining,
    }))
}
