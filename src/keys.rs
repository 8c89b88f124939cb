use sha2::{Digest, Sha256};
use crate::models::AdmitRequest;

// Scope used when the caller does not name one
pub const DEFAULT_SCOPE: &str = "request";

// Pick the principal to throttle: an authenticated user id wins over the
// caller-supplied client IP. Empty strings count as absent.
pub fn resolve_identity(req: &AdmitRequest) -> Option<String> {
    if let Some(user) = req.user_id.as_deref() {
        if !user.is_empty() {
            return Some(format!("user:{}", user));
        }
    }
    if let Some(ip) = req.client_ip.as_deref() {
        if !ip.is_empty() {
            return Some(format!("ip:{}", ip));
        }
    }
    None
}

// Create a bucket key (hash of scope + identity). Keys stay opaque and
// fixed-size; raw identities never reach the registry.
pub fn bucket_key(scope: &str, identity: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scope.as_bytes());
    hasher.update(b"\n");
    hasher.update(identity.as_bytes());
    format!("{:x}", hasher.finalize())
}
