//! Upstream Figma API error taxonomy.
//!
//! Every failure talking to the Figma API is classified into one of the variants
//! below so callers (and the frontend) can distinguish a rejected token from a
//! per-resource permission problem, a missing resource, a broken upstream, or a
//! transient transport failure. The distinction drives the remediation action
//! surfaced to the user: a rejected token requires reconnecting the account, a
//! transport failure only requires retrying.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::{
    api::IntegrationErrorDto,
    validation::{IssueCode, Remediation},
};

/// Number of upstream body characters retained in diagnostics.
const BODY_SNIPPET_LENGTH: usize = 200;

#[derive(Error, Debug)]
pub enum FigmaError {
    /// The access token is missing, expired, or rejected outright (HTTP 401).
    #[error("Figma token invalid or expired: {0}")]
    AuthInvalid(String),

    /// The token is valid but lacks rights to a specific resource (HTTP 403).
    #[error("No permission to access this Figma resource: {0}")]
    PermissionDenied(String),

    /// The requested file or resource does not exist (HTTP 404).
    #[error("Figma resource not found: {0}")]
    NotFound(String),

    /// Any other non-success response from the Figma API.
    #[error("Figma API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Network or transport failure before a response was received.
    #[error("Figma API unreachable: {0}")]
    Unreachable(String),

    /// Every OAuth token exchange transport failed.
    ///
    /// Carries the concatenated diagnostic trail from all attempts (status,
    /// status text, truncated body). Never contains the client secret.
    #[error("All token exchange strategies failed: {0}")]
    TokenExchange(String),
}

impl FigmaError {
    /// Classifies a non-success Figma API response for a resource fetch.
    ///
    /// # Arguments
    /// - `status` - HTTP status returned by the upstream
    /// - `body` - Raw response body (truncated before storage)
    /// - `context` - Human-readable description of the resource being fetched
    pub fn from_status(status: StatusCode, body: &str, context: &str) -> Self {
        let snippet = truncate(body, BODY_SNIPPET_LENGTH);

        match status {
            StatusCode::UNAUTHORIZED => Self::AuthInvalid(context.to_string()),
            StatusCode::FORBIDDEN => Self::PermissionDenied(context.to_string()),
            StatusCode::NOT_FOUND => Self::NotFound(context.to_string()),
            _ => Self::Upstream {
                status: status.as_u16(),
                body: snippet,
            },
        }
    }

    /// Machine-readable issue code for this error.
    pub fn issue(&self) -> IssueCode {
        match self {
            Self::AuthInvalid(_) | Self::TokenExchange(_) => IssueCode::AuthInvalid,
            Self::PermissionDenied(_) => IssueCode::PermissionDenied,
            Self::Unreachable(_) => IssueCode::Unreachable,
            Self::NotFound(_) | Self::Upstream { .. } => IssueCode::None,
        }
    }

    /// Remediation action the user should take for this error.
    ///
    /// Auth and permission failures require reconnecting the Figma account;
    /// transport failures are transient and the caller should simply retry.
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::AuthInvalid(_) | Self::PermissionDenied(_) | Self::TokenExchange(_) => {
                Remediation::Reconnect
            }
            Self::NotFound(_) | Self::Upstream { .. } | Self::Unreachable(_) => Remediation::None,
        }
    }

    /// HTTP status this error maps to on the response surface.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::TokenExchange(_) => StatusCode::BAD_GATEWAY,
            Self::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Transport-level reqwest failures map to `Unreachable`.
///
/// Status-based classification never goes through this conversion; services
/// inspect the status explicitly before reading the body.
impl From<reqwest::Error> for FigmaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(err.to_string())
    }
}

/// Converts Figma errors into HTTP responses.
///
/// The response body carries the issue code and remediation action alongside the
/// message so the frontend can render a specific call to action ("Reconnect
/// Figma") instead of a generic failure.
impl IntoResponse for FigmaError {
    fn into_response(self) -> Response {
        tracing::debug!("Figma error: {}", self);

        let status = self.status_code();
        let body = IntegrationErrorDto {
            error: self.to_string(),
            issue: self.issue(),
            remediation: self.remediation(),
        };

        (status, Json(body)).into_response()
    }
}

/// Truncates a string to at most `limit` characters on a char boundary.
pub fn truncate(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}
