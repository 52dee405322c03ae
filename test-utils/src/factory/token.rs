//! Bodies for the OAuth token endpoint.

use serde_json::{json, Value};

/// Successful token exchange body.
pub fn token(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": "figr_refresh",
        "expires_in": 7776000,
    })
}

/// Rejection body in the shape the real endpoint uses.
pub fn token_error(message: &str) -> Value {
    json!({
        "error": true,
        "message": message,
    })
}
