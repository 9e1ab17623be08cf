//! Service trait for data access

use crate::core::Data;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing stored entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// The catalog is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Store a new entity, assigning its primary key
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by primary key
    async fn get(&self, pk: i64) -> Result<Option<T>>;

    /// List all entities in primary key order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity
    async fn update(&self, pk: i64, entity: T) -> Result<T>;

    /// Delete an entity, returning it if it existed
    async fn delete(&self, pk: i64) -> Result<Option<T>>;

    /// Search entities by an indexed field
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// Store a new entity unless a row already has `value` in the indexed
    /// `field`
    ///
    /// Returns `None` when the value is taken. The check and the insert
    /// must happen atomically.
    async fn create_unique(&self, field: &str, value: &str, entity: T) -> Result<Option<T>>;

    /// Replace an existing entity unless another row already has `value`
    /// in the indexed `field`
    ///
    /// Returns `None` when the value is taken, with the same atomicity as
    /// [`DataService::create_unique`].
    async fn update_unique(
        &self,
        pk: i64,
        field: &str,
        value: &str,
        entity: T,
    ) -> Result<Option<T>>;
}
