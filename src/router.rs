//! Route configuration and API documentation.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    controller::{auth, debug, designs, integrations},
    data::project_file::ProjectFileAssociation,
    model::{
        api::{
            AssociateFileDto, ErrorDto, FileAccessDto, IntegrationErrorDto, OAuthUrlDto,
            TokenCheckDto,
        },
        discovery::{
            DiscoveredFile, DiscoveredProject, DiscoveredTeam, DiscoveryHierarchy,
            DiscoverySummary,
        },
        frame::{Component, Frame},
        validation::{IssueCode, Remediation, ValidationResult},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        integrations::oauth_start,
        integrations::oauth_url,
        integrations::list_files,
        integrations::get_file_frames,
        integrations::associate_file,
        integrations::get_associated_file,
        integrations::remove_associated_file,
        auth::figma_callback,
        designs::get_project_frames,
        debug::token_check,
        debug::validate_integrations,
        debug::file_access,
    ),
    components(schemas(
        ErrorDto,
        IntegrationErrorDto,
        OAuthUrlDto,
        AssociateFileDto,
        TokenCheckDto,
        FileAccessDto,
        ProjectFileAssociation,
        DiscoveredFile,
        DiscoveredProject,
        DiscoveredTeam,
        DiscoverySummary,
        DiscoveryHierarchy,
        Frame,
        Component,
        IssueCode,
        Remediation,
        ValidationResult,
    )),
    tags(
        (name = "integrations", description = "Figma OAuth and file discovery"),
        (name = "auth", description = "OAuth callback handling"),
        (name = "designs", description = "Project-scoped design listing"),
        (name = "debug", description = "Integration diagnostics")
    )
)]
struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/integrations/figma/oauth/start",
            get(integrations::oauth_start),
        )
        .route(
            "/api/integrations/figma/oauth/url",
            get(integrations::oauth_url),
        )
        .route("/api/integrations/figma/files", get(integrations::list_files))
        .route(
            "/api/integrations/figma/files/{file_key}/frames",
            get(integrations::get_file_frames),
        )
        .route(
            "/api/integrations/figma/projects/{project_id}/file",
            post(integrations::associate_file)
                .get(integrations::get_associated_file)
                .delete(integrations::remove_associated_file),
        )
        .route("/api/auth/figma/callback", get(auth::figma_callback))
        .route(
            "/api/designs/{project_id}/frames",
            get(designs::get_project_frames),
        )
        .route(
            "/api/debug/figma/token-check/{user_id}",
            get(debug::token_check),
        )
        .route(
            "/api/debug/validate-integrations/{user_id}",
            get(debug::validate_integrations),
        )
        .route(
            "/api/debug/figma/file-access/{user_id}/{file_key}",
            get(debug::file_access),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
