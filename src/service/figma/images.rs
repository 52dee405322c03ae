//! Batch thumbnail rendering via `GET /v1/images/{key}`.

use std::collections::HashMap;

use crate::{
    error::figma::truncate,
    model::credential::Credential,
    service::figma::{wire::WireImageMap, FigmaService},
};

/// Characters of an error body kept in the warning log.
const LOG_BODY_SNIPPET: usize = 200;

impl FigmaService {
    /// Resolves rendered thumbnail URLs for a batch of node ids.
    ///
    /// Thumbnails are decoration: any failure (transport, non-success status,
    /// bad payload) yields an empty map and a warning instead of an error, so
    /// frame extraction keeps working when rendering is degraded. Node ids the
    /// upstream reports as unrenderable (explicit nulls) are dropped from the
    /// map.
    pub async fn resolve_thumbnails(
        &self,
        credential: &Credential,
        file_key: &str,
        node_ids: &[String],
    ) -> HashMap<String, String> {
        if node_ids.is_empty() {
            return HashMap::new();
        }

        let ids = node_ids.join(",");
        let request = self
            .http
            .get(self.api_url(&format!("/v1/images/{file_key}")))
            .bearer_auth(&credential.access_token)
            .query(&[("ids", ids.as_str()), ("format", "png"), ("scale", "1")]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Thumbnail render request failed for {}: {}", file_key, err);
                return HashMap::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Thumbnail render for {} returned {}: {}",
                file_key,
                status.as_u16(),
                truncate(&body, LOG_BODY_SNIPPET)
            );
            return HashMap::new();
        }

        let map: WireImageMap = match response.json().await {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!("Thumbnail render payload for {} invalid: {}", file_key, err);
                return HashMap::new();
            }
        };

        map.images
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, url)| url.map(|url| (id, url)))
            .collect()
    }
}
