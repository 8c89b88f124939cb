use serde::{Deserialize, Serialize};

// Admission check request format
#[derive(Deserialize, Serialize, Clone)]
pub struct AdmitRequest {
    // Authenticated user id, preferred key source
    #[serde(default)]
    pub user_id: Option<String>,
    // Caller-observed client address, fallback key source
    #[serde(default)]
    pub client_ip: Option<String>,
    // Action class sharing one budget, e.g. "post" or "ai_suggest"
    #[serde(default)]
    pub scope: Option<String>,
}

// Admission check response format
#[derive(Deserialize, Serialize, Clone)]
pub struct AdmitResponse {
    pub allowed: bool,
    // Tokens left for this key after the decision
    pub remaining: u32,
}
