//! Account discovery: teams → projects → files.
//!
//! Walks everything reachable by a credential and normalizes it into a
//! `DiscoveryHierarchy`. Branch failures (a team whose project listing
//! fails, a project whose file listing fails) are logged and skipped without
//! aborting the sibling branches; only an identity failure aborts the whole
//! discovery.
//!
//! Personal accounts (zero teams) get a synthesized placeholder pointing the
//! user at manual file association. This is a deliberate business rule, not
//! an error fallback: the upstream API offers no supported way to list
//! personal files, and the experimental endpoints are expensive and noisy.

use std::collections::HashSet;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use url::Url;

use crate::{
    error::figma::FigmaError,
    model::{
        credential::Credential,
        discovery::{
            DiscoveredFile, DiscoveredProject, DiscoveredTeam, DiscoveryHierarchy,
            DiscoverySummary,
        },
    },
    service::figma::{
        wire::{WireFile, WireFileList, WireProject, WireProjectList, WireTeam},
        FigmaService,
    },
};

/// Maximum in-flight listing requests during the discovery fan-out. Keeps
/// the walk inside upstream rate limits.
const DISCOVERY_CONCURRENCY: usize = 6;

/// Key of the synthesized personal-account placeholder entry.
pub const PERSONAL_ACCOUNT_KEY: &str = "personal-account-info";
/// Key of the synthesized manual-association entry.
pub const MANUAL_ADD_KEY: &str = "manual-add-file";
/// Key of the synthesized help entry.
pub const HELP_KEY: &str = "figma-help";
/// Key of the synthesized entry returned when discovery finds nothing.
pub const NO_FILES_KEY: &str = "no-files-found";

const UNNAMED_FILE: &str = "Untitled file";

impl FigmaService {
    /// Discovers every design file reachable by the credential.
    ///
    /// Fails only when the identity endpoint rejects the credential or is
    /// unreachable; team and project branches fail soft. The result always
    /// contains at least one file entry (synthetic if necessary) so the
    /// consuming UI never has to special-case an empty list.
    pub async fn discover(&self, credential: &Credential) -> Result<DiscoveryHierarchy, FigmaError> {
        let identity = self.fetch_identity(credential).await?;
        let teams = identity.teams.clone().unwrap_or_default();

        tracing::debug!("Figma discovery: {} team(s) on the account", teams.len());

        let mut files: Vec<DiscoveredFile> = if teams.is_empty() {
            // Personal account: no further discovery endpoints are attempted.
            tracing::info!("No Figma teams on account; synthesizing manual-association entries");
            personal_account_entries()
        } else {
            stream::iter(teams)
                .map(|team| self.discover_team(credential, team))
                .buffered(DISCOVERY_CONCURRENCY)
                .collect::<Vec<Vec<DiscoveredFile>>>()
                .await
                .into_iter()
                .flatten()
                .collect()
        };

        if files.is_empty() {
            files.push(no_files_entry());
        }

        // Same file key may surface under several projects; the first
        // occurrence keeps its grouping.
        let mut seen = HashSet::new();
        files.retain(|file| seen.insert(file.key.clone()));

        let teams = group_files(&files);
        let summary = DiscoverySummary {
            total_teams: teams.len(),
            total_projects: teams.iter().map(|team| team.projects.len()).sum(),
            total_files: files.len(),
            generated_at: Utc::now(),
            user_email: identity.email.clone(),
            user_handle: identity.handle.clone(),
            user_id: identity.identity_id(),
        };

        tracing::info!(
            "Figma discovery finished: {} file(s) across {} team(s)",
            summary.total_files,
            summary.total_teams
        );

        Ok(DiscoveryHierarchy {
            summary,
            teams,
            files,
        })
    }

    /// Lists one team's files across all its projects. Never fails: a broken
    /// team yields no files and a warning.
    async fn discover_team(&self, credential: &Credential, team: WireTeam) -> Vec<DiscoveredFile> {
        let team_name = team.name.clone().unwrap_or_else(|| "Unnamed team".to_string());

        let projects = match self.fetch_team_projects(credential, &team.id).await {
            Ok(projects) => projects,
            Err(err) => {
                tracing::warn!(
                    "Skipping team {} ({}): project listing failed: {}",
                    team_name,
                    team.id,
                    err
                );
                return Vec::new();
            }
        };

        stream::iter(projects)
            .map(|project| self.discover_project(credential, &team.id, &team_name, project))
            .buffered(DISCOVERY_CONCURRENCY)
            .collect::<Vec<Vec<DiscoveredFile>>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Lists one project's files, annotated with team and project metadata.
    /// Never fails: a broken project yields no files and a warning.
    async fn discover_project(
        &self,
        credential: &Credential,
        team_id: &str,
        team_name: &str,
        project: WireProject,
    ) -> Vec<DiscoveredFile> {
        let project_name = project
            .name
            .clone()
            .unwrap_or_else(|| "Unnamed project".to_string());

        match self.fetch_project_files(credential, &project.id).await {
            Ok(files) => files
                .into_iter()
                .map(|file| normalize_file(file, team_id, team_name, &project.id, &project_name))
                .collect(),
            Err(err) => {
                tracing::warn!(
                    "Skipping project {} ({}): file listing failed: {}",
                    project_name,
                    project.id,
                    err
                );
                Vec::new()
            }
        }
    }

    async fn fetch_team_projects(
        &self,
        credential: &Credential,
        team_id: &str,
    ) -> Result<Vec<WireProject>, FigmaError> {
        let response = self
            .http
            .get(self.api_url(&format!("/v1/teams/{team_id}/projects")))
            .bearer_auth(&credential.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigmaError::from_status(
                status,
                &body,
                &format!("project listing for team {team_id}"),
            ));
        }

        let list: WireProjectList =
            response.json().await.map_err(|err| FigmaError::Upstream {
                status: status.as_u16(),
                body: format!("invalid project list payload: {err}"),
            })?;

        Ok(list.projects.unwrap_or_default())
    }

    async fn fetch_project_files(
        &self,
        credential: &Credential,
        project_id: &str,
    ) -> Result<Vec<WireFile>, FigmaError> {
        let response = self
            .http
            .get(self.api_url(&format!("/v1/projects/{project_id}/files")))
            .bearer_auth(&credential.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigmaError::from_status(
                status,
                &body,
                &format!("file listing for project {project_id}"),
            ));
        }

        let list: WireFileList = response.json().await.map_err(|err| FigmaError::Upstream {
            status: status.as_u16(),
            body: format!("invalid file list payload: {err}"),
        })?;

        Ok(list.files.unwrap_or_default())
    }
}

/// Normalizes one upstream file record into the canonical entity.
fn normalize_file(
    file: WireFile,
    team_id: &str,
    team_name: &str,
    project_id: &str,
    project_name: &str,
) -> DiscoveredFile {
    let name = file.name.unwrap_or_else(|| UNNAMED_FILE.to_string());

    DiscoveredFile {
        url: file_url(&file.key, &name),
        display_name: format!("{name} ({project_name})"),
        key: file.key,
        name,
        thumbnail_url: file.thumbnail_url,
        last_modified: file.last_modified,
        team_id: team_id.to_string(),
        team_name: team_name.to_string(),
        project_id: project_id.to_string(),
        project_name: project_name.to_string(),
        description: file.description,
    }
}

/// Canonical web URL for a file, with the name percent-encoded as a path
/// segment.
fn file_url(key: &str, name: &str) -> Option<String> {
    let mut url = Url::parse("https://www.figma.com").ok()?;
    url.path_segments_mut()
        .ok()?
        .extend(["file", key, name]);
    Some(url.to_string())
}

/// Groups a flat file list into teams and projects, preserving first-seen
/// order at both levels.
fn group_files(files: &[DiscoveredFile]) -> Vec<DiscoveredTeam> {
    let mut teams: Vec<DiscoveredTeam> = Vec::new();

    for file in files {
        let team_at = teams
            .iter()
            .position(|team| team.id == file.team_id)
            .unwrap_or_else(|| {
                teams.push(DiscoveredTeam {
                    id: file.team_id.clone(),
                    name: file.team_name.clone(),
                    projects: Vec::new(),
                });
                teams.len() - 1
            });

        let projects = &mut teams[team_at].projects;
        let project_at = projects
            .iter()
            .position(|project| project.id == file.project_id)
            .unwrap_or_else(|| {
                projects.push(DiscoveredProject {
                    id: file.project_id.clone(),
                    name: file.project_name.clone(),
                    files: Vec::new(),
                });
                projects.len() - 1
            });

        projects[project_at].files.push(file.clone());
    }

    teams
}

/// Placeholder entries for personal accounts without team access.
fn personal_account_entries() -> Vec<DiscoveredFile> {
    vec![
        DiscoveredFile {
            key: PERSONAL_ACCOUNT_KEY.to_string(),
            name: "Personal Figma account - no automatic file access".to_string(),
            display_name: "Personal Figma account - no automatic file access (API limitation)"
                .to_string(),
            thumbnail_url: Some("https://placehold.co/300x180/3b82f6/ffffff?text=Personal".to_string()),
            url: Some("https://help.figma.com/hc/en-us/articles/360040328373-Create-a-team".to_string()),
            last_modified: Some(Utc::now().to_rfc3339()),
            team_id: "personal".to_string(),
            team_name: "Personal".to_string(),
            project_id: "config".to_string(),
            project_name: "API limitation".to_string(),
            description: Some(
                "The Figma API does not allow listing personal files automatically. \
                 Add your file manually or create a team."
                    .to_string(),
            ),
        },
        DiscoveredFile {
            key: MANUAL_ADD_KEY.to_string(),
            name: "Add your Figma file".to_string(),
            display_name: "Add your Figma file (Manual setup)".to_string(),
            thumbnail_url: Some("https://placehold.co/300x180/10b981/ffffff?text=Add".to_string()),
            url: Some("manual-add".to_string()),
            last_modified: Some(Utc::now().to_rfc3339()),
            team_id: "personal".to_string(),
            team_name: "Personal".to_string(),
            project_id: "manual".to_string(),
            project_name: "Manual setup".to_string(),
            description: Some(
                "Paste the URL of your Figma file to start mapping events and funnels.".to_string(),
            ),
        },
        DiscoveredFile {
            key: HELP_KEY.to_string(),
            name: "How do I find my file URL?".to_string(),
            display_name: "How do I find my file URL? (Help guide)".to_string(),
            thumbnail_url: Some("https://placehold.co/300x180/8b5cf6/ffffff?text=Help".to_string()),
            url: Some(
                "https://help.figma.com/hc/en-us/articles/360038006754-Share-files-and-prototypes"
                    .to_string(),
            ),
            last_modified: Some(Utc::now().to_rfc3339()),
            team_id: "personal".to_string(),
            team_name: "Personal".to_string(),
            project_id: "help".to_string(),
            project_name: "Help guide".to_string(),
            description: Some(
                "Learn how to share your Figma files and copy their URLs.".to_string(),
            ),
        },
    ]
}

/// Placeholder entry returned when discovery finds no files at all.
fn no_files_entry() -> DiscoveredFile {
    DiscoveredFile {
        key: NO_FILES_KEY.to_string(),
        name: "No accessible files found".to_string(),
        display_name: "No accessible files found (Information)".to_string(),
        thumbnail_url: Some("https://placehold.co/200x120/fbbf24/000000?text=No+Files".to_string()),
        url: Some("https://www.figma.com".to_string()),
        last_modified: Some(Utc::now().to_rfc3339()),
        team_id: "system".to_string(),
        team_name: "System".to_string(),
        project_id: "info".to_string(),
        project_name: "Information".to_string(),
        description: None,
    }
}
