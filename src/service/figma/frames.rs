//! Frame ingestion pipeline for a single design file.
//!
//! Composition of the other service modules: validate the credential, fetch
//! the document, extract frames and their components, then decorate the
//! frames with rendered thumbnails. Thumbnail failure degrades the result;
//! everything earlier in the pipeline aborts it.

use crate::{
    error::figma::FigmaError,
    model::{
        credential::Credential,
        document::{NodeArena, NodeId},
        frame::{Frame, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH},
        validation::{IssueCode, ValidationResult},
    },
    service::figma::{document, wire::WireFileDocument, FigmaService},
};

use std::collections::HashMap;

const UNNAMED_FRAME: &str = "Unnamed Frame";

impl FigmaService {
    /// Fetches a file's full document payload from `GET /v1/files/{key}`.
    pub async fn fetch_file(
        &self,
        credential: &Credential,
        file_key: &str,
    ) -> Result<WireFileDocument, FigmaError> {
        let response = self
            .http
            .get(self.api_url(&format!("/v1/files/{file_key}")))
            .bearer_auth(&credential.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigmaError::from_status(
                status,
                &body,
                &format!("file fetch for {file_key}"),
            ));
        }

        response
            .json::<WireFileDocument>()
            .await
            .map_err(|err| FigmaError::Upstream {
                status: status.as_u16(),
                body: format!("invalid file payload: {err}"),
            })
    }

    /// Extracts the frames of a file, with components and thumbnails.
    ///
    /// The credential is health-checked before the file is touched, so a dead
    /// token surfaces as `auth-invalid` rather than whatever the file endpoint
    /// happens to answer. A file with no canvas-level frames returns an empty
    /// list without calling the image endpoint.
    pub async fn get_file_frames(
        &self,
        credential: &Credential,
        file_key: &str,
    ) -> Result<Vec<Frame>, FigmaError> {
        let health = self.validate(credential).await;
        if !health.valid {
            return Err(invalid_credential_error(health));
        }

        let document = self.fetch_file(credential, file_key).await?;
        let arena = document::build_arena(document.document);
        let frame_ids = document::extract_frames(&arena);

        if frame_ids.is_empty() {
            tracing::info!("File {} contains no canvas-level frames", file_key);
            return Ok(Vec::new());
        }

        let node_ids: Vec<String> = frame_ids
            .iter()
            .map(|&frame| arena.get(frame).id.clone())
            .collect();
        let thumbnails = self
            .resolve_thumbnails(credential, file_key, &node_ids)
            .await;

        tracing::info!(
            "File {}: {} frame(s), {} thumbnail(s) rendered",
            file_key,
            frame_ids.len(),
            thumbnails.len()
        );

        Ok(frame_ids
            .into_iter()
            .map(|frame| assemble_frame(&arena, frame, &thumbnails))
            .collect())
    }
}

/// Maps a failed health check onto the error taxonomy.
fn invalid_credential_error(health: ValidationResult) -> FigmaError {
    match health.issue {
        IssueCode::PermissionDenied => FigmaError::PermissionDenied(health.message),
        IssueCode::Unreachable => FigmaError::Unreachable(health.message),
        _ => FigmaError::AuthInvalid(health.message),
    }
}

fn assemble_frame(
    arena: &NodeArena,
    frame: NodeId,
    thumbnails: &HashMap<String, String>,
) -> Frame {
    let node = arena.get(frame);
    let bounds = node.bounding_box.unwrap_or_default();

    Frame {
        id: node.id.clone(),
        name: if node.name.is_empty() {
            UNNAMED_FRAME.to_string()
        } else {
            node.name.clone()
        },
        x: bounds.x.unwrap_or(0.0),
        y: bounds.y.unwrap_or(0.0),
        width: bounds.width.unwrap_or(DEFAULT_FRAME_WIDTH),
        height: bounds.height.unwrap_or(DEFAULT_FRAME_HEIGHT),
        thumb_url: thumbnails.get(&node.id).cloned(),
        components: document::extract_components(arena, frame),
    }
}
