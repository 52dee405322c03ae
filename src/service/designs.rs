//! Project-scoped design listing.
//!
//! Resolves the file associated with a project and extracts its frames,
//! trying more than one credential: the requesting user first, then the user
//! who associated the file. A permission denial from the upstream is
//! authoritative for every candidate and short-circuits the chain; other
//! failures move on to the next candidate.

use std::sync::Arc;

use crate::{
    data::{credential::CredentialStore, project_file::ProjectFileStore},
    error::{figma::FigmaError, AppError},
    model::frame::Frame,
    service::figma::FigmaService,
};

pub struct DesignService {
    figma: FigmaService,
    credentials: Arc<dyn CredentialStore>,
    project_files: Arc<dyn ProjectFileStore>,
}

impl DesignService {
    pub fn new(
        figma: FigmaService,
        credentials: Arc<dyn CredentialStore>,
        project_files: Arc<dyn ProjectFileStore>,
    ) -> Self {
        Self {
            figma,
            credentials,
            project_files,
        }
    }

    /// Frames of the file associated with a project.
    ///
    /// Credential candidates are tried in order until one serves the file.
    /// A project without an association, and a project whose candidates all
    /// fail for transient or auth reasons, both degrade to an empty list
    /// rather than an error; the UI treats that the same as a project with
    /// no frames. A `permission-denied` answer is final and propagates
    /// immediately.
    pub async fn get_project_frames(
        &self,
        project_id: &str,
        current_user_id: &str,
    ) -> Result<Vec<Frame>, AppError> {
        let Some(association) = self.project_files.get(project_id).await else {
            tracing::info!("Project {} has no associated Figma file", project_id);
            return Ok(Vec::new());
        };

        let candidates = credential_candidates(current_user_id, &association.user_id);
        tracing::debug!(
            "Listing frames for project {} (file {}) with {} credential candidate(s)",
            project_id,
            association.file_key,
            candidates.len()
        );

        for candidate in &candidates {
            let Some(credential) = self.credentials.get(candidate).await else {
                tracing::debug!("Candidate {} has no Figma credential", candidate);
                continue;
            };

            match self
                .figma
                .get_file_frames(&credential, &association.file_key)
                .await
            {
                Ok(frames) => {
                    tracing::info!(
                        "Project {}: served {} frame(s) with credential of {}",
                        project_id,
                        frames.len(),
                        candidate
                    );
                    return Ok(frames);
                }
                Err(err @ FigmaError::PermissionDenied(_)) => {
                    // Denied for one token means denied for all of them; the
                    // file itself is locked down.
                    tracing::warn!(
                        "Project {}: access to file {} denied: {}",
                        project_id,
                        association.file_key,
                        err
                    );
                    return Err(err.into());
                }
                Err(err) => {
                    tracing::warn!(
                        "Project {}: candidate {} failed: {}",
                        project_id,
                        candidate,
                        err
                    );
                }
            }
        }

        tracing::error!(
            "Project {}: every credential candidate failed for file {}; returning no frames",
            project_id,
            association.file_key
        );
        Ok(Vec::new())
    }
}

/// Ordered, deduplicated credential candidates: the requesting user, then the
/// associating user.
fn credential_candidates(current_user_id: &str, associator_id: &str) -> Vec<String> {
    let mut candidates = vec![current_user_id.to_string()];
    if associator_id != current_user_id {
        candidates.push(associator_id.to_string());
    }
    candidates
}
