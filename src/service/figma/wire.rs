//! Wire models for Figma API payloads.
//!
//! These structs mirror what the upstream actually sends, including its
//! naming inconsistencies: the same concept arrives as `thumbnail_url` or
//! `thumbnailUrl` depending on the endpoint, and numeric ids arrive as
//! numbers on some endpoints and strings on others. All of that is absorbed
//! here, once; everything past this module works with canonical shapes.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Accepts an id serialized as either a JSON string or a number.
fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(value) => value,
        Raw::Number(value) => value.to_string(),
    })
}

fn deserialize_flexible_id_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::String(value) => value,
        Raw::Number(value) => value.to_string(),
    }))
}

/// Response body of the OAuth token endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct WireTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Team reference embedded in the identity payload.
#[derive(Deserialize, Debug, Clone)]
pub struct WireTeam {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Nested user object some identity responses wrap the id in.
#[derive(Deserialize, Debug, Default)]
pub struct WireNestedUser {
    #[serde(default, deserialize_with = "deserialize_flexible_id_opt")]
    pub id: Option<String>,
}

/// Response body of `GET /v1/me`.
#[derive(Deserialize, Debug, Default)]
pub struct WireIdentity {
    #[serde(default, deserialize_with = "deserialize_flexible_id_opt")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub teams: Option<Vec<WireTeam>>,
    #[serde(default)]
    pub user: Option<WireNestedUser>,
}

impl WireIdentity {
    /// Figma user id, tolerating the nested `user.id` variant.
    pub fn identity_id(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.user.as_ref().and_then(|user| user.id.clone()))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WireProject {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response body of `GET /v1/teams/{id}/projects`.
#[derive(Deserialize, Debug, Default)]
pub struct WireProjectList {
    #[serde(default)]
    pub projects: Option<Vec<WireProject>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WireFile {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response body of `GET /v1/projects/{id}/files`.
#[derive(Deserialize, Debug, Default)]
pub struct WireFileList {
    #[serde(default)]
    pub files: Option<Vec<WireFile>>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct WireBoundingBox {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// One node of the recursive document payload.
#[derive(Deserialize, Debug)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "absoluteBoundingBox")]
    pub absolute_bounding_box: Option<WireBoundingBox>,
    #[serde(default)]
    pub children: Option<Vec<WireNode>>,
}

/// Response body of `GET /v1/files/{key}`.
#[derive(Deserialize, Debug)]
pub struct WireFileDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub document: WireNode,
}

/// Response body of `GET /v1/images/{key}`.
///
/// Figma reports unrenderable ids as explicit nulls, hence the nested Option.
#[derive(Deserialize, Debug, Default)]
pub struct WireImageMap {
    #[serde(default)]
    pub images: Option<HashMap<String, Option<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that numeric and string ids both normalize to strings.
    ///
    /// Expected: project ids parse regardless of JSON representation
    #[test]
    fn test_flexible_id_parsing() {
        let numeric: WireProject = serde_json::from_str(r#"{"id": 123, "name": "App"}"#).unwrap();
        assert_eq!(numeric.id, "123");

        let string: WireProject = serde_json::from_str(r#"{"id": "123", "name": "App"}"#).unwrap();
        assert_eq!(string.id, "123");
    }

    /// Tests both thumbnail field spellings normalize to one field.
    ///
    /// Expected: snake_case and camelCase inputs populate thumbnail_url
    #[test]
    fn test_thumbnail_alias() {
        let snake: WireFile =
            serde_json::from_str(r#"{"key": "k", "thumbnail_url": "https://a"}"#).unwrap();
        assert_eq!(snake.thumbnail_url.as_deref(), Some("https://a"));

        let camel: WireFile =
            serde_json::from_str(r#"{"key": "k", "thumbnailUrl": "https://a"}"#).unwrap();
        assert_eq!(camel.thumbnail_url.as_deref(), Some("https://a"));
    }

    /// Tests the nested `user.id` fallback on the identity payload.
    ///
    /// Expected: identity_id reads the top-level id first, then user.id
    #[test]
    fn test_identity_id_fallback() {
        let top: WireIdentity = serde_json::from_str(r#"{"id": "u1"}"#).unwrap();
        assert_eq!(top.identity_id().as_deref(), Some("u1"));

        let nested: WireIdentity = serde_json::from_str(r#"{"user": {"id": "u2"}}"#).unwrap();
        assert_eq!(nested.identity_id().as_deref(), Some("u2"));
    }
}
