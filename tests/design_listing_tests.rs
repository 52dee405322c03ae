//! Integration tests for the project-scoped design listing and its
//! multi-credential fallback, against a mock HTTP server.
//!
//! Run with: cargo test --test design_listing_tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frameweaver::config::Config;
use frameweaver::data::credential::{CredentialStore, InMemoryCredentialStore};
use frameweaver::data::project_file::{
    InMemoryProjectFileStore, ProjectFileAssociation, ProjectFileStore,
};
use frameweaver::error::{figma::FigmaError, AppError};
use frameweaver::model::credential::Credential;
use frameweaver::service::{designs::DesignService, figma::FigmaService};
use test_utils::builder::{document, NodeBuilder};
use test_utils::factory::{identity, listing};

fn config_for(uri: &str) -> Arc<Config> {
    Arc::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        figma_client_id: "client-id".to_string(),
        figma_client_secret: "secret".to_string(),
        figma_redirect_url: "http://localhost:8080/api/auth/figma/callback".to_string(),
        figma_scopes: "file_read".to_string(),
        figma_auth_url: format!("{uri}/oauth"),
        figma_token_url: format!("{uri}/v1/oauth/token"),
        figma_api_url: uri.to_string(),
        frontend_url: "http://localhost:5173".to_string(),
        upstream_deadline_seconds: 5,
    })
}

fn credential(token: &str) -> Credential {
    Credential {
        access_token: token.to_string(),
        refresh_token: None,
        expires_at: None,
        provider_identity_id: None,
    }
}

fn association(project_id: &str, user_id: &str, file_key: &str) -> ProjectFileAssociation {
    ProjectFileAssociation {
        project_id: project_id.to_string(),
        user_id: user_id.to_string(),
        file_key: file_key.to_string(),
        file_name: "Checkout".to_string(),
        file_url: None,
        thumbnail: None,
        last_synced: Utc::now(),
        is_active: true,
    }
}

struct Setup {
    designs: DesignService,
    credentials: Arc<InMemoryCredentialStore>,
    project_files: Arc<InMemoryProjectFileStore>,
}

fn setup(uri: &str) -> Setup {
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let project_files = Arc::new(InMemoryProjectFileStore::new());
    let figma = FigmaService::new(reqwest::Client::new(), config_for(uri));

    Setup {
        designs: DesignService::new(figma, credentials.clone(), project_files.clone()),
        credentials,
        project_files,
    }
}

fn one_frame_document() -> serde_json::Value {
    listing::file_payload(
        "Checkout",
        document(vec![NodeBuilder::new("CANVAS", "0:1")
            .child(NodeBuilder::new("FRAME", "f1").name("Home"))]),
    )
}

fn valid_identity() -> serde_json::Value {
    identity::identity("u-figma", "owner@example.com", "owner", &[("t1", "Product")])
}

/// Tests the fallback to the associator's credential when the requester's
/// token is rejected.
///
/// Expected: frames served through the second candidate
#[tokio::test]
async fn test_fallback_to_associator_credential() {
    let mock_server = MockServer::start().await;
    let env = setup(&mock_server.uri());

    env.credentials.set("u1", credential("figd_bad")).await;
    env.credentials.set("u2", credential("figd_good")).await;
    env.project_files.set(association("p1", "u2", "KEY")).await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer figd_bad"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer figd_good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(valid_identity()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .and(header("authorization", "Bearer figd_good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_frame_document()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/images/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing::images(&[])))
        .mount(&mock_server)
        .await;

    let frames = env.designs.get_project_frames("p1", "u1").await.unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].name, "Home");
}

/// Tests that a permission denial stops the candidate chain immediately.
///
/// Expected: 403-class error; the associator's credential is never tried
#[tokio::test]
async fn test_permission_denied_short_circuits() {
    let mock_server = MockServer::start().await;
    let env = setup(&mock_server.uri());

    env.credentials.set("u1", credential("figd_one")).await;
    env.credentials.set("u2", credential("figd_two")).await;
    env.project_files.set(association("p1", "u2", "KEY")).await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer figd_one"))
        .respond_with(ResponseTemplate::new(200).set_body_json(valid_identity()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .and(header("authorization", "Bearer figd_one"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Locked down"))
        .mount(&mock_server)
        .await;

    // The second candidate would succeed, but must never be consulted.
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer figd_two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(valid_identity()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = env.designs.get_project_frames("p1", "u1").await.unwrap_err();

    assert!(matches!(
        err,
        AppError::FigmaErr(FigmaError::PermissionDenied(_))
    ));
}

/// Tests the degraded empty listing when every candidate is exhausted.
///
/// Expected: Ok with no frames, not an error
#[tokio::test]
async fn test_exhausted_candidates_return_empty() {
    let mock_server = MockServer::start().await;
    let env = setup(&mock_server.uri());

    // Association exists but neither user has a stored credential.
    env.project_files.set(association("p1", "u2", "KEY")).await;

    let frames = env.designs.get_project_frames("p1", "u1").await.unwrap();

    assert!(frames.is_empty());
}

/// Tests the missing-association case.
///
/// Expected: empty list, same as a project with no frames
#[tokio::test]
async fn test_missing_association() {
    let mock_server = MockServer::start().await;
    let env = setup(&mock_server.uri());

    let frames = env.designs.get_project_frames("p9", "u1").await.unwrap();

    assert!(frames.is_empty());
}

/// Tests that a deactivated association behaves like a missing one.
///
/// Expected: empty list after deactivation
#[tokio::test]
async fn test_deactivated_association() {
    let mock_server = MockServer::start().await;
    let env = setup(&mock_server.uri());

    env.project_files.set(association("p1", "u2", "KEY")).await;
    env.project_files.deactivate("p1").await;

    let frames = env.designs.get_project_frames("p1", "u1").await.unwrap();

    assert!(frames.is_empty());
}
