use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth credential for the Figma API.
///
/// Owned by the calling user's account record; the discovery and ingestion
/// services only read it and never mutate it. Token refresh is out of scope,
/// so an expired credential always surfaces as `auth-invalid` with a
/// reconnect remediation.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Figma user id this credential belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_identity_id: Option<String>,
}

impl Credential {
    /// Whether the credential's expiry timestamp has passed.
    ///
    /// A credential without an expiry never expires from this check's point
    /// of view; the upstream will reject it if it is actually invalid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Short prefix of the access token, safe for diagnostics.
    pub fn token_preview(&self) -> String {
        let preview: String = self.access_token.chars().take(10).collect();
        format!("{preview}...")
    }
}
