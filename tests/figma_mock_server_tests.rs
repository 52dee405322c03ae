//! Integration tests for the Figma service against a mock HTTP server.
//! These tests don't require Figma credentials and run without external
//! dependencies.
//!
//! Run with: cargo test --test figma_mock_server_tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frameweaver::config::Config;
use frameweaver::error::figma::FigmaError;
use frameweaver::model::credential::Credential;
use frameweaver::model::validation::{IssueCode, Remediation};
use frameweaver::service::figma::discovery::{NO_FILES_KEY, PERSONAL_ACCOUNT_KEY};
use frameweaver::service::figma::FigmaService;
use test_utils::builder::{document, NodeBuilder};
use test_utils::factory::{identity, listing, token};

const CLIENT_SECRET: &str = "super-secret-value";

/// Config pointing every upstream URL at the mock server.
fn config_for(uri: &str) -> Arc<Config> {
    Arc::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        figma_client_id: "client-id".to_string(),
        figma_client_secret: CLIENT_SECRET.to_string(),
        figma_redirect_url: "http://localhost:8080/api/auth/figma/callback".to_string(),
        figma_scopes: "file_read".to_string(),
        figma_auth_url: format!("{uri}/oauth"),
        figma_token_url: format!("{uri}/v1/oauth/token"),
        figma_api_url: uri.to_string(),
        frontend_url: "http://localhost:5173".to_string(),
        upstream_deadline_seconds: 5,
    })
}

fn service(uri: &str) -> FigmaService {
    FigmaService::new(reqwest::Client::new(), config_for(uri))
}

fn credential(token: &str) -> Credential {
    Credential {
        access_token: token.to_string(),
        refresh_token: None,
        expires_at: None,
        provider_identity_id: None,
    }
}

// ============= Token exchange =============

/// Tests the GET fallback when the POST transport is rejected.
///
/// Expected: the credential from the GET response, POST failure only logged
#[tokio::test]
async fn test_token_exchange_post_then_get_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/oauth/token"))
        .and(query_param("code", "auth-code"))
        .and(query_param("grant_type", "authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token::token("figd_X")))
        .mount(&mock_server)
        .await;

    let credential = service(&mock_server.uri())
        .exchange_code("auth-code")
        .await
        .unwrap();

    assert_eq!(credential.access_token, "figd_X");
    assert!(credential.expires_at.unwrap() > Utc::now());
}

/// Tests the diagnostic trail when every transport fails.
///
/// Expected: both attempts recorded, client secret absent from the trail
#[tokio::test]
async fn test_token_exchange_all_transports_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(token::token_error("Invalid code")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/oauth/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(token::token_error("Invalid code")),
        )
        .mount(&mock_server)
        .await;

    let err = service(&mock_server.uri())
        .exchange_code("bad-code")
        .await
        .unwrap_err();

    match err {
        FigmaError::TokenExchange(trail) => {
            assert!(trail.contains("POST failed: 400"));
            assert!(trail.contains("GET failed: 400"));
            assert!(!trail.contains(CLIENT_SECRET));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Tests that a 200 body without an access token falls through to GET.
///
/// Expected: GET fallback serves the credential
#[tokio::test]
async fn test_token_exchange_empty_token_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token::token("figd_Y")))
        .mount(&mock_server)
        .await;

    let credential = service(&mock_server.uri())
        .exchange_code("auth-code")
        .await
        .unwrap();

    assert_eq!(credential.access_token, "figd_Y");
}

// ============= Validation =============

/// Tests classification of a 403 from the identity endpoint.
///
/// Expected: permission-denied with a reconnect remediation
#[tokio::test]
async fn test_validate_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid scope"))
        .mount(&mock_server)
        .await;

    let result = service(&mock_server.uri())
        .validate(&credential("figd_limited"))
        .await;

    assert!(!result.valid);
    assert_eq!(result.issue, IssueCode::PermissionDenied);
    assert_eq!(result.remediation, Remediation::Reconnect);
}

/// Tests the transport-failure classification.
///
/// Expected: unreachable with no remediation, never an Err
#[tokio::test]
async fn test_validate_unreachable() {
    // Nothing listens on this port.
    let result = service("http://127.0.0.1:9")
        .validate(&credential("figd_any"))
        .await;

    assert!(!result.valid);
    assert_eq!(result.issue, IssueCode::Unreachable);
    assert_eq!(result.remediation, Remediation::None);
}

/// Tests that an expired credential is rejected without a network call.
///
/// Expected: auth-invalid; the unmounted identity endpoint is never hit
#[tokio::test]
async fn test_validate_expired_short_circuit() {
    let mock_server = MockServer::start().await;

    let mut expired = credential("figd_old");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));

    let result = service(&mock_server.uri()).validate(&expired).await;

    assert!(!result.valid);
    assert_eq!(result.issue, IssueCode::AuthInvalid);
    assert!(result.message.contains("expired"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

/// Tests the not-connected verdict for a missing credential.
///
/// Expected: not-connected with a connect remediation
#[tokio::test]
async fn test_validate_connection_missing_credential() {
    let mock_server = MockServer::start().await;

    let result = service(&mock_server.uri()).validate_connection(None).await;

    assert!(!result.valid);
    assert_eq!(result.issue, IssueCode::NotConnected);
    assert_eq!(result.remediation, Remediation::Connect);
}

// ============= Discovery =============

/// Tests the personal-account synthesis for a zero-team identity.
///
/// Expected: three placeholder entries, exactly one personal-account entry
#[tokio::test]
async fn test_discovery_personal_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(identity::personal_identity("u1", "solo@example.com")),
        )
        .mount(&mock_server)
        .await;

    let hierarchy = service(&mock_server.uri())
        .discover(&credential("figd_personal"))
        .await
        .unwrap();

    assert_eq!(hierarchy.files.len(), 3);
    assert_eq!(
        hierarchy
            .files
            .iter()
            .filter(|file| file.key == PERSONAL_ACCOUNT_KEY)
            .count(),
        1
    );
    assert_eq!(hierarchy.summary.total_files, 3);
    assert_eq!(
        hierarchy.summary.user_email.as_deref(),
        Some("solo@example.com")
    );
}

/// Tests that a team whose project listing fails is skipped, not fatal.
///
/// Expected: files of the healthy team only, decorated display names
#[tokio::test]
async fn test_discovery_skips_failed_team() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity::identity(
            "u1",
            "designer@example.com",
            "designer",
            &[("t1", "Product"), ("t2", "Marketing")],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/projects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing::projects(&[("p1", "App")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing::files(&[("k1", "Home"), ("k2", "Checkout")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t2/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let hierarchy = service(&mock_server.uri())
        .discover(&credential("figd_team"))
        .await
        .unwrap();

    assert_eq!(hierarchy.files.len(), 2);
    assert_eq!(hierarchy.teams.len(), 1);
    assert_eq!(hierarchy.summary.total_teams, 1);
    assert_eq!(hierarchy.summary.total_projects, 1);

    let home = &hierarchy.files[0];
    assert_eq!(home.display_name, "Home (App)");
    assert_eq!(home.url.as_deref(), Some("https://www.figma.com/file/k1/Home"));
    assert_eq!(home.team_name, "Product");
}

/// Tests first-occurrence deduplication of a file shared by two projects.
///
/// Expected: one flat entry, grouped under the first project
#[tokio::test]
async fn test_discovery_dedupes_by_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity::identity(
            "u1",
            "designer@example.com",
            "designer",
            &[("t1", "Product")],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing::projects(&[("p1", "App"), ("p2", "Web")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing::files(&[("dup", "Shared")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p2/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing::files(&[("dup", "Shared")])),
        )
        .mount(&mock_server)
        .await;

    let hierarchy = service(&mock_server.uri())
        .discover(&credential("figd_team"))
        .await
        .unwrap();

    assert_eq!(hierarchy.files.len(), 1);
    assert_eq!(hierarchy.files[0].project_id, "p1");
    assert_eq!(hierarchy.teams[0].projects.len(), 1);
}

/// Tests the placeholder entry when discovery comes back empty.
///
/// Expected: a single no-files-found entry
#[tokio::test]
async fn test_discovery_empty_yields_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity::identity(
            "u1",
            "designer@example.com",
            "designer",
            &[("t1", "Product")],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing::projects(&[])))
        .mount(&mock_server)
        .await;

    let hierarchy = service(&mock_server.uri())
        .discover(&credential("figd_team"))
        .await
        .unwrap();

    assert_eq!(hierarchy.files.len(), 1);
    assert_eq!(hierarchy.files[0].key, NO_FILES_KEY);
}

/// Tests that a rejected identity aborts discovery outright.
///
/// Expected: auth-invalid error, no placeholder synthesis
#[tokio::test]
async fn test_discovery_identity_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&mock_server)
        .await;

    let err = service(&mock_server.uri())
        .discover(&credential("figd_revoked"))
        .await
        .unwrap_err();

    assert!(matches!(err, FigmaError::AuthInvalid(_)));
}

// ============= Frame extraction pipeline =============

fn three_frame_document() -> serde_json::Value {
    listing::file_payload(
        "Checkout",
        document(vec![NodeBuilder::new("CANVAS", "0:1")
            .name("Page 1")
            .child(
                NodeBuilder::new("FRAME", "f1")
                    .name("Home")
                    .bounds(0.0, 0.0, 1440.0, 900.0)
                    .child(NodeBuilder::new("TEXT", "t1").name("Title")),
            )
            .child(NodeBuilder::new("FRAME", "f2").name("Cart"))
            .child(NodeBuilder::new("FRAME", "f3").name("Payment"))]),
    )
}

fn mount_valid_identity(mock_server: &MockServer) -> Mock {
    Mock::given(method("GET")).and(path("/v1/me")).respond_with(
        ResponseTemplate::new(200).set_body_json(identity::identity(
            "u1",
            "designer@example.com",
            "designer",
            &[("t1", "Product")],
        )),
    )
}

/// Tests the composed pipeline: validate, fetch, extract, decorate.
///
/// Expected: three frames; unrenderable frame keeps a None thumbnail;
/// absent bounds default to the phone viewport
#[tokio::test]
async fn test_get_file_frames_pipeline() {
    let mock_server = MockServer::start().await;

    mount_valid_identity(&mock_server).mount(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_frame_document()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/images/KEY"))
        .and(query_param("format", "png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing::images(&[
            ("f1", Some("https://render/f1.png")),
            ("f2", Some("https://render/f2.png")),
            ("f3", None),
        ])))
        .mount(&mock_server)
        .await;

    let frames = service(&mock_server.uri())
        .get_file_frames(&credential("figd_ok"), "KEY")
        .await
        .unwrap();

    assert_eq!(frames.len(), 3);

    let home = &frames[0];
    assert_eq!(home.name, "Home");
    assert_eq!(home.width, 1440.0);
    assert_eq!(home.thumb_url.as_deref(), Some("https://render/f1.png"));
    assert_eq!(home.components.len(), 1);
    assert_eq!(home.components[0].component_type, "TEXT");

    let cart = &frames[1];
    assert_eq!(cart.width, 375.0);
    assert_eq!(cart.height, 812.0);

    assert!(frames[2].thumb_url.is_none());
}

/// Tests classification of a missing file.
///
/// Expected: not-found error from the file endpoint
#[tokio::test]
async fn test_get_file_frames_not_found() {
    let mock_server = MockServer::start().await;

    mount_valid_identity(&mock_server).mount(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/files/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let err = service(&mock_server.uri())
        .get_file_frames(&credential("figd_ok"), "GONE")
        .await
        .unwrap_err();

    assert!(matches!(err, FigmaError::NotFound(_)));
}

/// Tests that a broken image endpoint degrades thumbnails, not the listing.
///
/// Expected: frames served with every thumb_url None
#[tokio::test]
async fn test_get_file_frames_thumbnail_failure_degrades() {
    let mock_server = MockServer::start().await;

    mount_valid_identity(&mock_server).mount(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_frame_document()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/images/KEY"))
        .respond_with(ResponseTemplate::new(500).set_body_string("render farm down"))
        .mount(&mock_server)
        .await;

    let frames = service(&mock_server.uri())
        .get_file_frames(&credential("figd_ok"), "KEY")
        .await
        .unwrap();

    assert_eq!(frames.len(), 3);
    assert!(frames.iter().all(|frame| frame.thumb_url.is_none()));
}

/// Tests that a frameless document skips the image endpoint entirely.
///
/// Expected: empty result; no request reaches /v1/images
#[tokio::test]
async fn test_get_file_frames_empty_skips_images() {
    let mock_server = MockServer::start().await;

    mount_valid_identity(&mock_server).mount(&mock_server).await;

    let frameless = listing::file_payload(
        "Empty",
        document(vec![NodeBuilder::new("CANVAS", "0:1")
            .child(NodeBuilder::new("GROUP", "g1").name("notes"))]),
    );

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(frameless))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/images/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing::images(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let frames = service(&mock_server.uri())
        .get_file_frames(&credential("figd_ok"), "KEY")
        .await
        .unwrap();

    assert!(frames.is_empty());
}

/// Tests that an expired credential aborts the pipeline before the file
/// endpoint is touched.
///
/// Expected: auth-invalid; no request reaches /v1/files
#[tokio::test]
async fn test_get_file_frames_expired_credential() {
    let mock_server = MockServer::start().await;

    let mut expired = credential("figd_old");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));

    let err = service(&mock_server.uri())
        .get_file_frames(&expired, "KEY")
        .await
        .unwrap_err();

    assert!(matches!(err, FigmaError::AuthInvalid(_)));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

// ============= Canvas JSON parsing quirk =============

/// Tests that canvases wrapped in JSON bounds-less sections still surface
/// their frames through discovery of the document tree.
///
/// Expected: frames under a SECTION-wrapped canvas are found
#[tokio::test]
async fn test_get_file_frames_section_wrapped_canvas() {
    let mock_server = MockServer::start().await;

    mount_valid_identity(&mock_server).mount(&mock_server).await;

    let wrapped = listing::file_payload(
        "Wrapped",
        document(vec![NodeBuilder::new("SECTION", "s1").child(
            NodeBuilder::new("CANVAS", "0:1").child(NodeBuilder::new("FRAME", "f1").name("Deep")),
        )]),
    );

    Mock::given(method("GET"))
        .and(path("/v1/files/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wrapped))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/images/KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing::images(&[])))
        .mount(&mock_server)
        .await;

    let frames = service(&mock_server.uri())
        .get_file_frames(&credential("figd_ok"), "KEY")
        .await
        .unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].name, "Deep");
}
