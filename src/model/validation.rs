use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification of a credential health probe.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    /// Credential is healthy (or the error carries no credential issue).
    None,
    /// No credential is stored for this user.
    NotConnected,
    /// The token is missing, expired, or rejected by the upstream (401).
    AuthInvalid,
    /// The token is valid but lacks access to the probed resource (403).
    PermissionDenied,
    /// The upstream could not be reached; transient.
    Unreachable,
}

/// Action the user should take to fix a failed validation.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Remediation {
    /// Connect the Figma account for the first time.
    Connect,
    /// Re-run the OAuth flow to replace a rejected token.
    Reconnect,
    /// Nothing to do; retry later.
    None,
}

/// Result of probing a credential against the Figma identity endpoint.
///
/// Produced fresh on every validation call and never cached: the endpoint is
/// polled for UI status display, so a stale verdict would mask a revoked
/// token. Validation never fails; transport problems are reported inside the
/// result.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub issue: IssueCode,
    pub message: String,
    pub remediation: Remediation,
}

impl ValidationResult {
    pub fn valid(message: String) -> Self {
        Self {
            valid: true,
            issue: IssueCode::None,
            message,
            remediation: Remediation::None,
        }
    }

    pub fn invalid(issue: IssueCode, message: String, remediation: Remediation) -> Self {
        Self {
            valid: false,
            issue,
            message,
            remediation,
        }
    }
}
