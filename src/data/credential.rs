use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::credential::Credential;

/// Read/write access to per-user Figma OAuth credentials.
///
/// The discovery and ingestion services only ever read through this trait;
/// the single writer is the OAuth callback controller after a successful
/// token exchange.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Option<Credential>;

    async fn set(&self, user_id: &str, credential: Credential);

    async fn clear(&self, user_id: &str);
}

/// In-memory credential store for local runs and tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, user_id: &str) -> Option<Credential> {
        self.credentials.read().await.get(user_id).cloned()
    }

    async fn set(&self, user_id: &str, credential: Credential) {
        self.credentials
            .write()
            .await
            .insert(user_id.to_string(), credential);
    }

    async fn clear(&self, user_id: &str) {
        self.credentials.write().await.remove(user_id);
    }
}
