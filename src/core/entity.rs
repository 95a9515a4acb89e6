//! Entity trait defining the core abstraction for all resource types

/// Base trait for all entities exposed by the API.
///
/// Every entity has an integer id and lives under a plural resource name
/// in the URL space (`/universities/{id}`, `/modules/{id}`).
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "universities", "modules")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "university", "module")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> i64;

    /// Path of the collection, relative to the base URI
    fn collection_path() -> String {
        format!("/{}", Self::resource_name())
    }

    /// Path of a single entity, relative to the base URI
    fn item_path(id: i64) -> String {
        format!("/{}/{}", Self::resource_name(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: i64,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> i64 {
            self.id
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
        assert_eq!(TestEntity { id: 4 }.id(), 4);
    }

    #[test]
    fn test_entity_paths() {
        assert_eq!(TestEntity::collection_path(), "/test_entities");
        assert_eq!(TestEntity::item_path(12), "/test_entities/12");
    }
}
