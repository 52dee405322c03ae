//! Normalized account discovery entities.
//!
//! Upstream file payloads arrive with inconsistent field naming (snake_case
//! and camelCase variants of the same concept). The wire layer normalizes
//! everything into `DiscoveredFile` exactly once, at the discovery boundary;
//! the rest of the application only sees these canonical shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A design file reachable by a credential, annotated with the team and
/// project it was discovered under.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredFile {
    pub key: String,
    pub name: String,
    /// Name decorated with the owning project, for display in pickers.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub team_id: String,
    pub team_name: String,
    pub project_id: String,
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Files grouped under one project.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct DiscoveredProject {
    pub id: String,
    pub name: String,
    pub files: Vec<DiscoveredFile>,
}

/// Projects grouped under one team.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct DiscoveredTeam {
    pub id: String,
    pub name: String,
    pub projects: Vec<DiscoveredProject>,
}

/// Counts and identity context for one discovery pass.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverySummary {
    pub total_teams: usize,
    pub total_projects: usize,
    pub total_files: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Everything reachable by one credential: the team → project → file
/// grouping, a flat deduplicated file list, and summary counts.
///
/// Built fresh per discovery call and never persisted.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct DiscoveryHierarchy {
    pub summary: DiscoverySummary,
    pub teams: Vec<DiscoveredTeam>,
    pub files: Vec<DiscoveredFile>,
}
