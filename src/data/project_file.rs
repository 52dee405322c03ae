use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// Association between an analytics project and one Figma file.
///
/// `user_id` records who made the association; the design listing uses it as
/// a fallback credential candidate when the current user cannot access the
/// file.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFileAssociation {
    pub project_id: String,
    pub user_id: String,
    pub file_key: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub last_synced: DateTime<Utc>,
    pub is_active: bool,
}

/// Read/write access to project → Figma file associations.
#[async_trait]
pub trait ProjectFileStore: Send + Sync {
    /// Active association for the project, if any.
    async fn get(&self, project_id: &str) -> Option<ProjectFileAssociation>;

    async fn set(&self, association: ProjectFileAssociation);

    /// Deactivates the association without deleting the record.
    async fn deactivate(&self, project_id: &str);
}

/// In-memory association store for local runs and tests.
#[derive(Default)]
pub struct InMemoryProjectFileStore {
    associations: Arc<RwLock<HashMap<String, ProjectFileAssociation>>>,
}

impl InMemoryProjectFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectFileStore for InMemoryProjectFileStore {
    async fn get(&self, project_id: &str) -> Option<ProjectFileAssociation> {
        self.associations
            .read()
            .await
            .get(project_id)
            .filter(|association| association.is_active)
            .cloned()
    }

    async fn set(&self, association: ProjectFileAssociation) {
        self.associations
            .write()
            .await
            .insert(association.project_id.clone(), association);
    }

    async fn deactivate(&self, project_id: &str) {
        if let Some(association) = self.associations.write().await.get_mut(project_id) {
            association.is_active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn association(project_id: &str) -> ProjectFileAssociation {
        ProjectFileAssociation {
            project_id: project_id.to_string(),
            user_id: "user-1".to_string(),
            file_key: "abc123".to_string(),
            file_name: "Checkout".to_string(),
            file_url: None,
            thumbnail: None,
            last_synced: Utc::now(),
            is_active: true,
        }
    }

    /// Tests that deactivated associations are hidden from lookups.
    ///
    /// Expected: get returns None after deactivate
    #[tokio::test]
    async fn test_deactivate_hides_association() {
        let store = InMemoryProjectFileStore::new();
        store.set(association("p-1")).await;
        assert!(store.get("p-1").await.is_some());

        store.deactivate("p-1").await;
        assert!(store.get("p-1").await.is_none());
    }
}
