//! In-memory implementation of Repository for development and testing

use crate::core::{Entity, Repository};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory repository implementation
///
/// Records are kept in a `BTreeMap` so listings come back ordered by id.
/// Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryRepository<T: Entity> {
    entities: Arc<RwLock<BTreeMap<i64, T>>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn save(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.clear();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: i64,
        text: String,
    }

    impl Entity for Note {
        fn resource_name() -> &'static str {
            "notes"
        }

        fn resource_name_singular() -> &'static str {
            "note"
        }

        fn id(&self) -> i64 {
            self.id
        }
    }

    fn note(id: i64, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryRepository::new();
        repo.save(note(1, "first")).await.unwrap();

        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(found, Some(note(1, "first")));
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let repo = InMemoryRepository::new();
        repo.save(note(1, "first")).await.unwrap();
        repo.save(note(1, "second")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![note(1, "second")]);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryRepository::new();
        repo.save(note(3, "c")).await.unwrap();
        repo.save(note(1, "a")).await.unwrap();
        repo.save(note(2, "b")).await.unwrap();

        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryRepository::new();
        repo.save(note(1, "a")).await.unwrap();

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = InMemoryRepository::new();
        repo.save(note(1, "a")).await.unwrap();
        repo.save(note(2, "b")).await.unwrap();

        repo.delete_all().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_by_id_skips_missing() {
        let repo = InMemoryRepository::new();
        repo.save(note(1, "a")).await.unwrap();
        repo.save(note(3, "c")).await.unwrap();

        let found = repo.find_all_by_id(&[1, 2, 3]).await.unwrap();
        assert_eq!(found, vec![note(1, "a"), note(3, "c")]);
    }
}
