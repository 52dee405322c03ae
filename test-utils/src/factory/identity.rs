//! Bodies for `GET /v1/me`.

use serde_json::{json, Value};

/// Identity payload with the given teams.
pub fn identity(id: &str, email: &str, handle: &str, teams: &[(&str, &str)]) -> Value {
    json!({
        "id": id,
        "email": email,
        "handle": handle,
        "teams": teams
            .iter()
            .map(|(team_id, name)| json!({"id": team_id, "name": name}))
            .collect::<Vec<_>>(),
    })
}

/// Identity payload of a personal account: no teams at all.
pub fn personal_identity(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "handle": "solo",
        "teams": [],
    })
}
