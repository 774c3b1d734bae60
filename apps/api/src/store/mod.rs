//! Persistence for the resume list.
//!
//! Storage is a flat key-value seam (`KeyValueStore`) so the controllers can
//! run against the in-memory fake in tests and the JSON file on disk in the
//! server. `ResumeStore` keeps the whole resume sequence under one key and
//! always rewrites it in full.

pub mod file;
pub mod memory;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::resume::Resume;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// Key the resume list is stored under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "cvwizard-resumes";

/// String key-value storage. Last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// The durable resume sequence, serialized as one JSON array.
#[derive(Clone)]
pub struct ResumeStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl ResumeStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the last saved sequence.
    ///
    /// Nothing saved, an unreadable store, and content that does not parse as
    /// a resume list all yield an empty sequence. There is no partial recovery.
    pub async fn load(&self) -> Vec<Resume> {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}' from the store, starting empty: {e:?}", self.key);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Resume>>(&raw) {
            Ok(resumes) => {
                info!("Loaded {} resumes from '{}'", resumes.len(), self.key);
                resumes
            }
            Err(e) => {
                warn!("Discarding unparseable resume data under '{}': {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Overwrites the stored sequence with `resumes`.
    pub async fn save_all(&self, resumes: &[Resume]) -> Result<()> {
        let raw = serde_json::to_string(resumes).context("Failed to serialize resumes")?;
        self.kv
            .set(&self.key, raw)
            .await
            .with_context(|| format!("Failed to write '{}'", self.key))?;
        info!("Saved {} resumes to '{}'", resumes.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;
    use chrono::Utc;
    use uuid::Uuid;

    fn resume(title: &str) -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            title: title.to_string(),
            template: "classic".to_string(),
            personal_info: PersonalInfo::default(),
            experience: vec![],
            education: vec![],
            skills: vec![],
            languages: vec![],
            hobbies: vec![],
            courses: vec![],
            references: vec![],
            certificates: vec![],
            signature: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn store_over(kv: &InMemoryKeyValueStore) -> ResumeStore {
        ResumeStore::new(Arc::new(kv.clone()), DEFAULT_STORE_KEY)
    }

    #[tokio::test]
    async fn test_load_empty_when_nothing_saved() {
        let kv = InMemoryKeyValueStore::default();
        assert!(store_over(&kv).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_all_then_load_round_trips() {
        let kv = InMemoryKeyValueStore::default();
        let store = store_over(&kv);
        let saved = vec![resume("One"), resume("Two")];
        store.save_all(&saved).await.unwrap();
        assert_eq!(store.load().await, saved);
    }

    #[tokio::test]
    async fn test_save_all_overwrites_previous_sequence() {
        let kv = InMemoryKeyValueStore::default();
        let store = store_over(&kv);
        store.save_all(&[resume("One"), resume("Two")]).await.unwrap();
        let latest = vec![resume("Three")];
        store.save_all(&latest).await.unwrap();
        assert_eq!(store.load().await, latest);
    }

    #[tokio::test]
    async fn test_garbage_content_loads_as_empty() {
        let kv = InMemoryKeyValueStore::default();
        kv.set(DEFAULT_STORE_KEY, "{not json".to_string()).await.unwrap();
        assert!(store_over(&kv).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_partially_valid_content_loads_as_empty() {
        let kv = InMemoryKeyValueStore::default();
        let good = serde_json::to_value(resume("Good")).unwrap();
        let raw = serde_json::json!([good, {"id": "nope"}]).to_string();
        kv.set(DEFAULT_STORE_KEY, raw).await.unwrap();
        assert!(store_over(&kv).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_stores_under_configured_key() {
        let kv = InMemoryKeyValueStore::default();
        let store = ResumeStore::new(Arc::new(kv.clone()), "custom-key");
        store.save_all(&[resume("One")]).await.unwrap();
        assert!(kv.get("custom-key").await.unwrap().is_some());
        assert!(kv.get(DEFAULT_STORE_KEY).await.unwrap().is_none());
    }
}
