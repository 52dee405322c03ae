//! OAuth authorization-code exchange.
//!
//! The Figma token endpoint has historically accepted the exchange parameters
//! either as a form-encoded POST body or as a query string on a GET. The
//! exchange tries the POST transport first and falls back to GET when the
//! response is a non-200, fails to parse, or carries no access token. Each
//! attempt appends to a diagnostic trail that is surfaced when every
//! transport fails; the trail never contains the client secret.

use chrono::{Duration, Utc};
use oauth2::CsrfToken;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{
        figma::{truncate, FigmaError},
        AppError,
    },
    model::credential::Credential,
    service::figma::{wire::WireTokenResponse, FigmaService},
};

/// Characters of an upstream response body kept in the diagnostic trail.
const TRAIL_BODY_SNIPPET: usize = 200;

/// State payload round-tripped through the OAuth authorize redirect.
///
/// Carries the acting user (and optionally the project being connected) so
/// the callback can store the credential against the right account, plus a
/// random nonce.
#[derive(Serialize, Deserialize, Debug)]
pub struct OAuthState {
    /// Integration tag; always "figma" for this flow.
    pub t: String,
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub uid: String,
    pub nonce: String,
}

impl FigmaService {
    /// Builds a fresh OAuth state payload for the given user and project.
    pub fn new_oauth_state(&self, user_id: &str, project_id: Option<String>) -> OAuthState {
        OAuthState {
            t: "figma".to_string(),
            project_id,
            uid: user_id.to_string(),
            nonce: CsrfToken::new_random().secret().clone(),
        }
    }

    /// Builds the Figma authorize URL for the configured client.
    ///
    /// Scopes may be configured space- or comma-separated; they are sent
    /// space-joined as the OAuth spec expects.
    pub fn login_url(&self, state: &OAuthState) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.config.figma_auth_url)
            .map_err(|err| AppError::InternalError(format!("Invalid Figma auth URL: {err}")))?;

        let scope = self
            .config
            .figma_scopes
            .split([' ', ','])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let state_json = serde_json::to_string(state)
            .map_err(|err| AppError::InternalError(format!("Failed to encode OAuth state: {err}")))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.figma_client_id)
            .append_pair("redirect_uri", &self.config.figma_redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &scope)
            .append_pair("state", &state_json);

        Ok(url)
    }

    /// Exchanges an authorization code for a credential.
    ///
    /// Tries the form-encoded POST transport, then the GET query-string
    /// fallback. The first response whose body parses to JSON with a
    /// non-empty `access_token` wins. If both transports fail, the error
    /// carries the concatenated diagnostic trail from every attempt.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, FigmaError> {
        let params = [
            ("client_id", self.config.figma_client_id.as_str()),
            ("client_secret", self.config.figma_client_secret.as_str()),
            ("redirect_uri", self.config.figma_redirect_url.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ];

        let mut trail: Vec<String> = Vec::new();

        // Strategy 1: standard form-encoded POST.
        let post_attempt = self
            .http
            .post(&self.config.figma_token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await;

        match post_attempt {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        if status == StatusCode::OK {
                            match parse_token_body(&body) {
                                Ok(credential) => {
                                    tracing::debug!("Token exchange POST transport succeeded");
                                    return Ok(credential);
                                }
                                Err(reason) => trail.push(format!("POST parse error: {reason}")),
                            }
                        } else {
                            trail.push(format!(
                                "POST failed: {} {} - {}",
                                status.as_u16(),
                                status.canonical_reason().unwrap_or("unknown"),
                                truncate(&body, TRAIL_BODY_SNIPPET)
                            ));
                        }
                    }
                    Err(err) => trail.push(format!("POST body read error: {err}")),
                }
            }
            Err(err) => trail.push(format!("POST request error: {err}")),
        }

        tracing::debug!(
            "Token exchange falling back to GET transport: {}",
            trail.join(" | ")
        );

        // Strategy 2: GET with the same parameters as a query string.
        let get_attempt = self
            .http
            .get(&self.config.figma_token_url)
            .header(ACCEPT, "application/json")
            .query(&params)
            .send()
            .await;

        match get_attempt {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        if status == StatusCode::OK {
                            match parse_token_body(&body) {
                                Ok(credential) => {
                                    tracing::debug!("Token exchange GET fallback succeeded");
                                    return Ok(credential);
                                }
                                Err(reason) => trail.push(format!("GET parse error: {reason}")),
                            }
                        } else {
                            trail.push(format!(
                                "GET failed: {} {} - {}",
                                status.as_u16(),
                                status.canonical_reason().unwrap_or("unknown"),
                                truncate(&body, TRAIL_BODY_SNIPPET)
                            ));
                        }
                    }
                    Err(err) => trail.push(format!("GET body read error: {err}")),
                }
            }
            Err(err) => trail.push(format!("GET request error: {err}")),
        }

        let trail = trail.join(" | ");
        tracing::error!("All token exchange strategies failed: {}", trail);

        Err(FigmaError::TokenExchange(trail))
    }
}

/// Parses a token endpoint body into a credential.
///
/// An empty or missing `access_token` is treated as a parse failure so the
/// caller moves on to the next transport.
fn parse_token_body(body: &str) -> Result<Credential, String> {
    let token: WireTokenResponse = serde_json::from_str(body).map_err(|err| err.to_string())?;

    match token.access_token.filter(|value| !value.is_empty()) {
        Some(access_token) => Ok(Credential {
            access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            provider_identity_id: None,
        }),
        None => Err("response contained no access_token".to_string()),
    }
}
