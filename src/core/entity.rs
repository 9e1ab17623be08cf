//! Entity traits defining the core abstraction for all stored types

use chrono::{DateTime, Utc};

use crate::core::field::FieldValue;
use crate::core::id::{GlobalId, NodeKind};

/// Base trait for everything the storage layer persists.
///
/// All entities have:
/// - pk: integer primary key, assigned by the store on create
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "categories", "pages")
    fn resource_name() -> &'static str;

    /// Primary key, `0` until the entity has been stored
    fn pk(&self) -> i64;

    /// Called by the store when the entity is first persisted
    fn assign_pk(&mut self, pk: i64);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at`
    fn touch(&mut self);
}

/// Entities with named fields that the storage layer can search on.
pub trait Data: Entity {
    /// Fields accepted by [`DataService::search`](crate::core::service::DataService::search)
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// Entities exposed through the relay `Node` interface
pub trait NodeEntity: Data {
    const KIND: NodeKind;

    fn global_id(&self) -> GlobalId {
        GlobalId::new(Self::KIND, self.pk())
    }
}
