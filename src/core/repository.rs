//! Repository trait for entity persistence

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;

/// Persistence trait for one entity type
///
/// Implementations store whole records keyed by id; each call is atomic per
/// record. The services are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Get an entity by id
    async fn find_by_id(&self, id: i64) -> Result<Option<T>>;

    /// List all entities, ordered by id
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Insert or replace the record with the entity's id
    async fn save(&self, entity: T) -> Result<T>;

    /// Delete an entity, returning whether it existed
    async fn delete_by_id(&self, id: i64) -> Result<bool>;

    /// Delete every entity
    async fn delete_all(&self) -> Result<()>;

    /// Fetch several entities at once, skipping ids that do not exist
    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<T>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entity) = self.find_by_id(*id).await? {
                found.push(entity);
            }
        }
        Ok(found)
    }
}

/// Outcome of an upsert-style update
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<T> {
    /// The entity existed and was overwritten
    Updated(T),
    /// The entity did not exist and was created under the requested id
    Created(Created<T>),
}

/// A freshly created entity and the URI where it can be found
#[derive(Debug, Clone, PartialEq)]
pub struct Created<T> {
    pub entity: T,
    pub location: String,
}
