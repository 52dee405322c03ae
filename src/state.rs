//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - HTTP client for upstream Figma API requests
//! - Application configuration (OAuth credentials, upstream URLs)
//! - Credential store for per-user Figma OAuth tokens
//! - Project/file association store

use std::sync::Arc;

use crate::{
    config::Config,
    data::{credential::CredentialStore, project_file::ProjectFileStore},
    service::{designs::DesignService, figma::FigmaService},
};

/// Application state containing shared resources and dependencies.
///
/// This struct holds all the shared state that needs to be accessible across
/// request handlers. It is initialized once during server startup and then
/// cloned (cheaply, as it contains reference-counted or cloneable types) for
/// each incoming request via Axum's state extraction.
///
/// All fields use cheap-to-clone types:
/// - `reqwest::Client` uses an `Arc` internally
/// - `Config` and the stores are behind `Arc`
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for making upstream API requests.
    ///
    /// Configured with redirects disabled and a request timeout. Used for all
    /// Figma API and OAuth calls.
    pub http_client: reqwest::Client,

    /// Application configuration loaded from the environment.
    pub config: Arc<Config>,

    /// Store holding each user's Figma OAuth credential.
    ///
    /// Persistence of credentials is owned by an external collaborator; this
    /// application only reads and writes through the trait boundary.
    pub credentials: Arc<dyn CredentialStore>,

    /// Store holding the Figma file associated with each project.
    pub project_files: Arc<dyn ProjectFileStore>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// This constructor is called once during server startup after all
    /// dependencies have been initialized. The resulting state is then
    /// provided to the Axum router for use in request handlers.
    pub fn new(
        http_client: reqwest::Client,
        config: Arc<Config>,
        credentials: Arc<dyn CredentialStore>,
        project_files: Arc<dyn ProjectFileStore>,
    ) -> Self {
        Self {
            http_client,
            config,
            credentials,
            project_files,
        }
    }

    /// Builds a Figma service bound to this state's HTTP client and configuration.
    pub fn figma(&self) -> FigmaService {
        FigmaService::new(self.http_client.clone(), self.config.clone())
    }

    /// Builds a design service over this state's stores.
    pub fn designs(&self) -> DesignService {
        DesignService::new(
            self.figma(),
            self.credentials.clone(),
            self.project_files.clone(),
        )
    }
}
