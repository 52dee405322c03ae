use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::validation::{IssueCode, Remediation};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Error body for upstream integration failures.
///
/// Carries the machine-readable issue code and the remediation action so the
/// frontend can render a specific call to action instead of a generic failure
/// message.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct IntegrationErrorDto {
    pub error: String,
    pub issue: IssueCode,
    pub remediation: Remediation,
}

/// Response for the OAuth authorize-URL endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct OAuthUrlDto {
    pub url: String,
}

/// Diagnostic report for a stored Figma token.
///
/// Only a short token preview is ever included; the full token never leaves
/// the server.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenCheckDto {
    pub has_token: bool,
    pub token_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<usize>,
    pub message: String,
}

/// Request body for associating a Figma file with a project.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssociateFileDto {
    pub file_key: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Diagnostic report for direct access to a single Figma file.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileAccessDto {
    pub file_key: String,
    pub accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_causes: Vec<String>,
}
