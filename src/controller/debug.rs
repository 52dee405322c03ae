//! Operational diagnostics for support and troubleshooting.
//!
//! These endpoints report on a named user's integration health without acting
//! on the caller's own identity. Responses never contain a full token; at
//! most a short preview is included.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::{figma::FigmaError, AppError},
    model::{
        api::{FileAccessDto, TokenCheckDto},
        validation::ValidationResult,
    },
    state::AppState,
};

/// Tag for grouping debug endpoints in OpenAPI documentation
pub static DEBUG_TAG: &str = "debug";

/// Check the stored Figma token of a user against the live API.
///
/// Probes the identity endpoint with the stored credential and reports
/// whether it was accepted, plus the identity it resolves to. The response
/// carries a short token preview only.
///
/// # Returns
/// - `200 OK` - Diagnostic report (also for missing or rejected tokens)
#[utoipa::path(
    get,
    path = "/api/debug/figma/token-check/{user_id}",
    tag = DEBUG_TAG,
    params(
        ("user_id" = String, Path, description = "User whose token to probe")
    ),
    responses(
        (status = 200, description = "Token diagnostic report", body = TokenCheckDto)
    ),
)]
pub async fn token_check(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(credential) = state.credentials.get(&user_id).await else {
        return Ok((
            StatusCode::OK,
            Json(TokenCheckDto {
                has_token: false,
                token_valid: false,
                token_preview: None,
                status: None,
                user_email: None,
                user_handle: None,
                teams: None,
                message: "No Figma token stored for this user".to_string(),
            }),
        ));
    };

    let preview = Some(credential.token_preview());

    let report = match state.figma().fetch_identity(&credential).await {
        Ok(identity) => TokenCheckDto {
            has_token: true,
            token_valid: true,
            token_preview: preview,
            status: Some(200),
            user_email: identity.email.clone(),
            user_handle: identity.handle.clone(),
            teams: identity.teams.as_ref().map(Vec::len),
            message: "Token accepted by the Figma API".to_string(),
        },
        Err(err) => TokenCheckDto {
            has_token: true,
            token_valid: false,
            token_preview: preview,
            status: Some(err.status_code().as_u16()),
            user_email: None,
            user_handle: None,
            teams: None,
            message: err.to_string(),
        },
    };

    Ok((StatusCode::OK, Json(report)))
}

/// Validate every integration of a user.
///
/// Currently Figma is the only integration; the response is its validation
/// result, including the `not-connected` case.
///
/// # Returns
/// - `200 OK` - Validation result with issue code and remediation
#[utoipa::path(
    get,
    path = "/api/debug/validate-integrations/{user_id}",
    tag = DEBUG_TAG,
    params(
        ("user_id" = String, Path, description = "User whose integrations to validate")
    ),
    responses(
        (status = 200, description = "Validation result", body = ValidationResult)
    ),
)]
pub async fn validate_integrations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let credential = state.credentials.get(&user_id).await;
    let result = state.figma().validate_connection(credential.as_ref()).await;

    Ok((StatusCode::OK, Json(result)))
}

/// Check whether a user's credential can read a specific file.
///
/// Fetches the file directly and reports the outcome with likely causes on
/// failure, for support sessions where "the file won't load" needs a concrete
/// answer.
///
/// # Returns
/// - `200 OK` - Access diagnostic report (also for inaccessible files)
#[utoipa::path(
    get,
    path = "/api/debug/figma/file-access/{user_id}/{file_key}",
    tag = DEBUG_TAG,
    params(
        ("user_id" = String, Path, description = "User whose credential to use"),
        ("file_key" = String, Path, description = "Figma file key to probe")
    ),
    responses(
        (status = 200, description = "File access diagnostic report", body = FileAccessDto)
    ),
)]
pub async fn file_access(
    State(state): State<AppState>,
    Path((user_id, file_key)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let Some(credential) = state.credentials.get(&user_id).await else {
        return Ok((
            StatusCode::OK,
            Json(FileAccessDto {
                file_key,
                accessible: false,
                file_name: None,
                status: None,
                message: "No Figma token stored for this user".to_string(),
                possible_causes: vec!["Figma is not connected for this user".to_string()],
            }),
        ));
    };

    let report = match state.figma().fetch_file(&credential, &file_key).await {
        Ok(document) => FileAccessDto {
            file_key,
            accessible: true,
            file_name: document.name,
            status: Some(200),
            message: "File accessible with this credential".to_string(),
            possible_causes: Vec::new(),
        },
        Err(err) => {
            let status = Some(err.status_code().as_u16());
            let causes = possible_causes(&err);

            FileAccessDto {
                file_key,
                accessible: false,
                file_name: None,
                status,
                message: err.to_string(),
                possible_causes: causes,
            }
        }
    };

    Ok((StatusCode::OK, Json(report)))
}

/// Likely causes of a failed file probe, per error class.
fn possible_causes(err: &FigmaError) -> Vec<String> {
    match err {
        FigmaError::PermissionDenied(_) => vec![
            "The file is not shared with this Figma account".to_string(),
            "The token lacks the file_read scope".to_string(),
            "The file belongs to a team this account is not a member of".to_string(),
        ],
        FigmaError::NotFound(_) => vec![
            "The file key is wrong or truncated".to_string(),
            "The file was deleted or moved".to_string(),
        ],
        FigmaError::AuthInvalid(_) => vec![
            "The token expired or was revoked; reconnect the Figma account".to_string(),
        ],
        _ => vec!["The Figma API is unreachable or degraded; retry later".to_string()],
    }
}
