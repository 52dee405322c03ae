use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use url::Url;

use crate::{error::AppError, service::figma::token::OAuthState, state::AppState};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters of the OAuth callback.
///
/// Everything is optional: the provider sends `error` instead of `code` when
/// the user denies consent, and a malformed redirect may carry nothing at
/// all. The handler sorts it out and always lands the browser back on the
/// frontend.
#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Handle the Figma OAuth callback.
///
/// Exchanges the authorization code for a credential, stores it against the
/// user carried in the state payload, and redirects back to the frontend.
/// Every failure mode redirects with `?error=figma` instead of rendering an
/// error page; the browser never dead-ends on this endpoint.
///
/// # Returns
/// - `303 See Other` - To the frontend, with `connected=FIGMA` or `error=figma`
#[utoipa::path(
    get,
    path = "/api/auth/figma/callback",
    tag = AUTH_TAG,
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("state" = Option<String>, Query, description = "State payload from the authorize redirect"),
        ("error" = Option<String>, Query, description = "Provider error code, when consent was denied")
    ),
    responses(
        (status = 303, description = "Redirect back to the frontend")
    ),
)]
pub async fn figma_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(error) = params.error {
        tracing::warn!("Figma OAuth consent denied or failed: {}", error);
        return frontend_redirect(&state, RedirectOutcome::Error, None);
    }

    let Some(oauth_state) = params
        .state
        .as_deref()
        .and_then(|raw| serde_json::from_str::<OAuthState>(raw).ok())
    else {
        tracing::warn!("Figma OAuth callback carried a missing or malformed state payload");
        return frontend_redirect(&state, RedirectOutcome::Error, None);
    };

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        tracing::warn!("Figma OAuth callback carried no authorization code");
        return frontend_redirect(&state, RedirectOutcome::Error, oauth_state.project_id.as_deref());
    };

    let figma = state.figma();
    let mut credential = match figma.exchange_code(&code).await {
        Ok(credential) => credential,
        Err(err) => {
            tracing::error!("Figma token exchange failed for user {}: {}", oauth_state.uid, err);
            return frontend_redirect(
                &state,
                RedirectOutcome::Error,
                oauth_state.project_id.as_deref(),
            );
        }
    };

    // Best effort: annotate the credential with the Figma-side identity. A
    // failure here does not invalidate the freshly exchanged token.
    match figma.fetch_identity(&credential).await {
        Ok(identity) => credential.provider_identity_id = identity.identity_id(),
        Err(err) => {
            tracing::warn!("Could not resolve Figma identity after exchange: {}", err);
        }
    }

    state.credentials.set(&oauth_state.uid, credential).await;
    tracing::info!("Figma connected for user {}", oauth_state.uid);

    frontend_redirect(
        &state,
        RedirectOutcome::Connected,
        oauth_state.project_id.as_deref(),
    )
}

enum RedirectOutcome {
    Connected,
    Error,
}

fn frontend_redirect(
    state: &AppState,
    outcome: RedirectOutcome,
    project_id: Option<&str>,
) -> Result<Redirect, AppError> {
    let mut url = Url::parse(&state.config.frontend_url)
        .map_err(|err| AppError::InternalError(format!("Invalid frontend URL: {err}")))?;

    {
        let mut query = url.query_pairs_mut();
        match outcome {
            RedirectOutcome::Connected => query.append_pair("connected", "FIGMA"),
            RedirectOutcome::Error => query.append_pair("error", "figma"),
        };
        if let Some(project_id) = project_id {
            query.append_pair("projectId", project_id);
        }
    }

    Ok(Redirect::to(url.as_str()))
}
