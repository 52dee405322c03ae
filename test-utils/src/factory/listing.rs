//! Bodies for the team, project, file, and image listing endpoints.

use serde_json::{json, Value};

/// Body of `GET /v1/teams/{id}/projects`.
pub fn projects(entries: &[(&str, &str)]) -> Value {
    json!({
        "projects": entries
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name}))
            .collect::<Vec<_>>(),
    })
}

/// Body of `GET /v1/projects/{id}/files`.
pub fn files(entries: &[(&str, &str)]) -> Value {
    json!({
        "files": entries
            .iter()
            .map(|(key, name)| json!({
                "key": key,
                "name": name,
                "thumbnail_url": format!("https://cdn.example/{key}.png"),
                "last_modified": "2026-01-15T10:00:00Z",
            }))
            .collect::<Vec<_>>(),
    })
}

/// Body of `GET /v1/files/{key}` wrapping a document tree.
pub fn file_payload(name: &str, document: Value) -> Value {
    json!({
        "name": name,
        "lastModified": "2026-01-15T10:00:00Z",
        "version": "42",
        "role": "viewer",
        "document": document,
    })
}

/// Body of `GET /v1/images/{key}`.
///
/// `None` entries become explicit JSON nulls, as the real API reports
/// unrenderable nodes.
pub fn images(entries: &[(&str, Option<&str>)]) -> Value {
    let mut map = serde_json::Map::new();
    for (id, url) in entries {
        map.insert(
            (*id).to_string(),
            url.map_or(Value::Null, |url| json!(url)),
        );
    }

    json!({ "images": map })
}
