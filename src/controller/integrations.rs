use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    controller::with_deadline,
    data::project_file::ProjectFileAssociation,
    error::{figma::FigmaError, AppError},
    middleware::auth::CurrentUser,
    model::{
        api::{AssociateFileDto, ErrorDto, IntegrationErrorDto, OAuthUrlDto},
        credential::Credential,
        discovery::DiscoveryHierarchy,
        frame::Frame,
    },
    state::AppState,
};

/// Tag for grouping integration endpoints in OpenAPI documentation
pub static INTEGRATIONS_TAG: &str = "integrations";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthStartParams {
    /// Project to associate after the OAuth flow completes, if any.
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Looks up the user's stored Figma credential, rejecting unconnected users.
async fn require_credential(state: &AppState, user_id: &str) -> Result<Credential, AppError> {
    state.credentials.get(user_id).await.ok_or_else(|| {
        FigmaError::AuthInvalid("Figma is not connected. Connect your Figma account first.".to_string())
            .into()
    })
}

/// Start the Figma OAuth flow.
///
/// Redirects the browser to the Figma authorize page with a state payload
/// carrying the acting user and optional project.
///
/// # Arguments
/// - `state` - Application state containing OAuth configuration
/// - `user` - Acting user resolved by the fronting auth layer
/// - `params` - Optional project to associate after the flow
///
/// # Returns
/// - `303 See Other` - To the Figma authorize page
/// - `401 Unauthorized` - Missing user identity
#[utoipa::path(
    get,
    path = "/api/integrations/figma/oauth/start",
    tag = INTEGRATIONS_TAG,
    params(
        ("projectId" = Option<String>, Query, description = "Project to associate after OAuth")
    ),
    responses(
        (status = 303, description = "Redirect to the Figma authorize page"),
        (status = 401, description = "Missing user identity", body = ErrorDto)
    ),
)]
pub async fn oauth_start(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<OAuthStartParams>,
) -> Result<impl IntoResponse, AppError> {
    let figma = state.figma();
    let oauth_state = figma.new_oauth_state(&user.0, params.project_id);
    let url = figma.login_url(&oauth_state)?;

    Ok(Redirect::to(url.as_str()))
}

/// Get the Figma OAuth authorize URL without redirecting.
///
/// Used by frontends that open the OAuth flow in a popup and need the URL as
/// data rather than a redirect.
///
/// # Returns
/// - `200 OK` - The authorize URL
/// - `401 Unauthorized` - Missing user identity
#[utoipa::path(
    get,
    path = "/api/integrations/figma/oauth/url",
    tag = INTEGRATIONS_TAG,
    params(
        ("projectId" = Option<String>, Query, description = "Project to associate after OAuth")
    ),
    responses(
        (status = 200, description = "Authorize URL for the configured client", body = OAuthUrlDto),
        (status = 401, description = "Missing user identity", body = ErrorDto)
    ),
)]
pub async fn oauth_url(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<OAuthStartParams>,
) -> Result<impl IntoResponse, AppError> {
    let figma = state.figma();
    let oauth_state = figma.new_oauth_state(&user.0, params.project_id);
    let url = figma.login_url(&oauth_state)?;

    Ok((
        StatusCode::OK,
        Json(OAuthUrlDto {
            url: url.to_string(),
        }),
    ))
}

/// Discover every Figma file reachable by the user's credential.
///
/// Walks teams, projects, and files with bounded concurrency and returns the
/// grouped hierarchy plus a flat deduplicated list. Personal accounts without
/// teams receive synthesized manual-association entries.
///
/// # Returns
/// - `200 OK` - Discovery hierarchy with summary counts
/// - `401 Unauthorized` - Not connected or credential rejected
/// - `503 Service Unavailable` - Upstream unreachable or deadline exceeded
#[utoipa::path(
    get,
    path = "/api/integrations/figma/files",
    tag = INTEGRATIONS_TAG,
    responses(
        (status = 200, description = "Files reachable by the credential", body = DiscoveryHierarchy),
        (status = 401, description = "Not connected or credential rejected", body = IntegrationErrorDto),
        (status = 503, description = "Upstream unreachable", body = IntegrationErrorDto)
    ),
)]
pub async fn list_files(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let credential = require_credential(&state, &user.0).await?;
    let figma = state.figma();

    let hierarchy = with_deadline(&state.config, "Figma file discovery", async {
        figma.discover(&credential).await
    })
    .await?;

    Ok((StatusCode::OK, Json(hierarchy)))
}

/// Extract the frames of one Figma file.
///
/// Returns canvas-level frames with their interactive components and rendered
/// thumbnails where available.
///
/// # Returns
/// - `200 OK` - Extracted frames (possibly empty)
/// - `401 Unauthorized` - Not connected or credential rejected
/// - `403 Forbidden` - Credential lacks access to this file
/// - `404 Not Found` - File does not exist
/// - `503 Service Unavailable` - Upstream unreachable or deadline exceeded
#[utoipa::path(
    get,
    path = "/api/integrations/figma/files/{file_key}/frames",
    tag = INTEGRATIONS_TAG,
    params(
        ("file_key" = String, Path, description = "Figma file key")
    ),
    responses(
        (status = 200, description = "Frames of the file", body = Vec<Frame>),
        (status = 401, description = "Not connected or credential rejected", body = IntegrationErrorDto),
        (status = 403, description = "No access to this file", body = IntegrationErrorDto),
        (status = 404, description = "File not found", body = IntegrationErrorDto),
        (status = 503, description = "Upstream unreachable", body = IntegrationErrorDto)
    ),
)]
pub async fn get_file_frames(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(file_key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let credential = require_credential(&state, &user.0).await?;
    let figma = state.figma();

    let frames = with_deadline(&state.config, "Figma frame extraction", async {
        figma.get_file_frames(&credential, &file_key).await
    })
    .await?;

    Ok((StatusCode::OK, Json(frames)))
}

/// Associate a Figma file with a project.
///
/// Replaces any existing association for the project. The acting user is
/// recorded as the associator and serves as a fallback credential candidate
/// for the design listing.
///
/// # Returns
/// - `201 Created` - The stored association
/// - `400 Bad Request` - Empty file key
/// - `401 Unauthorized` - Missing user identity
#[utoipa::path(
    post,
    path = "/api/integrations/figma/projects/{project_id}/file",
    tag = INTEGRATIONS_TAG,
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    request_body = AssociateFileDto,
    responses(
        (status = 201, description = "Association stored", body = ProjectFileAssociation),
        (status = 400, description = "Empty file key", body = ErrorDto),
        (status = 401, description = "Missing user identity", body = ErrorDto)
    ),
)]
pub async fn associate_file(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Json(payload): Json<AssociateFileDto>,
) -> Result<impl IntoResponse, AppError> {
    if payload.file_key.trim().is_empty() {
        return Err(AppError::BadRequest("File key must not be empty".to_string()));
    }

    let association = ProjectFileAssociation {
        project_id: project_id.clone(),
        user_id: user.0,
        file_key: payload.file_key,
        file_name: payload.file_name,
        file_url: payload.file_url,
        thumbnail: payload.thumbnail,
        last_synced: Utc::now(),
        is_active: true,
    };

    state.project_files.set(association.clone()).await;
    tracing::info!(
        "Project {} associated with Figma file {}",
        project_id,
        association.file_key
    );

    Ok((StatusCode::CREATED, Json(association)))
}

/// Get the Figma file associated with a project.
///
/// # Returns
/// - `200 OK` - The active association
/// - `404 Not Found` - No active association for this project
#[utoipa::path(
    get,
    path = "/api/integrations/figma/projects/{project_id}/file",
    tag = INTEGRATIONS_TAG,
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Active association", body = ProjectFileAssociation),
        (status = 404, description = "No association", body = ErrorDto)
    ),
)]
pub async fn get_associated_file(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let association = state.project_files.get(&project_id).await.ok_or_else(|| {
        AppError::NotFound(format!("No Figma file associated with project {project_id}"))
    })?;

    Ok((StatusCode::OK, Json(association)))
}

/// Remove the Figma file association of a project.
///
/// Deactivates the association; the record is kept for audit but hidden from
/// lookups.
///
/// # Returns
/// - `204 No Content` - Association deactivated (idempotent)
#[utoipa::path(
    delete,
    path = "/api/integrations/figma/projects/{project_id}/file",
    tag = INTEGRATIONS_TAG,
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    responses(
        (status = 204, description = "Association deactivated")
    ),
)]
pub async fn remove_associated_file(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.project_files.deactivate(&project_id).await;
    tracing::info!("Project {} Figma association deactivated", project_id);

    Ok(StatusCode::NO_CONTENT)
}
