use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::with_deadline,
    error::AppError,
    middleware::auth::CurrentUser,
    model::{
        api::{ErrorDto, IntegrationErrorDto},
        frame::Frame,
    },
    state::AppState,
};

/// Tag for grouping design endpoints in OpenAPI documentation
pub static DESIGNS_TAG: &str = "designs";

/// Get the frames of the Figma file associated with a project.
///
/// Tries the requesting user's credential first, then falls back to the
/// credential of whoever associated the file. A project without an
/// association and a project whose candidates all fail both answer an empty
/// array; a permission denial from the upstream is final and surfaces as 403.
///
/// # Returns
/// - `200 OK` - Frames of the associated file (possibly empty)
/// - `401 Unauthorized` - Missing user identity
/// - `403 Forbidden` - Upstream denied access to the file
/// - `503 Service Unavailable` - Upstream unreachable or deadline exceeded
#[utoipa::path(
    get,
    path = "/api/designs/{project_id}/frames",
    tag = DESIGNS_TAG,
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Frames of the associated file", body = Vec<Frame>),
        (status = 401, description = "Missing user identity", body = ErrorDto),
        (status = 403, description = "Access to the file denied", body = IntegrationErrorDto),
        (status = 503, description = "Upstream unreachable", body = IntegrationErrorDto)
    ),
)]
pub async fn get_project_frames(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let designs = state.designs();

    let frames = with_deadline(&state.config, "Project design listing", async {
        designs.get_project_frames(&project_id, &user.0).await
    })
    .await?;

    Ok((StatusCode::OK, Json(frames)))
}
