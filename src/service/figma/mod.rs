//! Figma API integration.
//!
//! One service struct owns every upstream interaction: OAuth token exchange
//! (`token`), credential validation (`validate`), workspace discovery
//! (`discovery`), document traversal (`document`), thumbnail resolution
//! (`images`), and the composed frame ingestion pipeline (`frames`).
//!
//! The service is read-only against the upstream: it never performs write
//! operations on the Figma account, and it never refreshes tokens. Every
//! entity it produces is built fresh per call.

pub mod discovery;
pub mod document;
pub mod frames;
pub mod images;
pub mod token;
pub mod validate;
pub mod wire;

use std::sync::Arc;

use crate::config::Config;

pub struct FigmaService {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<Config>,
}

impl FigmaService {
    pub fn new(http: reqwest::Client, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    /// Joins a path onto the configured API base URL.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.figma_api_url.trim_end_matches('/'),
            path
        )
    }
}
