//! In-memory implementation of DataService
//!
//! Primary keys come from a per-store sequence starting at 1. Deleted keys
//! are never handed out again.

use crate::core::{Data, DataService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory data service implementation
///
/// Uses RwLock for thread-safe access; clones share the same data.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    rows: Arc<RwLock<BTreeMap<i64, T>>>,
    sequence: Arc<AtomicI64>,
}

impl<T: Data> InMemoryDataService<T> {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Assign the next pk and insert; the caller holds the write lock
    fn insert(&self, rows: &mut BTreeMap<i64, T>, mut entity: T) -> T {
        let pk = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        entity.assign_pk(pk);
        rows.insert(pk, entity.clone());
        entity
    }
}

fn replace<T: Data>(rows: &mut BTreeMap<i64, T>, pk: i64, mut entity: T) -> Result<T> {
    let slot = rows
        .get_mut(&pk)
        .ok_or_else(|| anyhow!("{} {} not found", T::resource_name(), pk))?;

    entity.assign_pk(pk);
    entity.touch();
    *slot = entity.clone();

    Ok(entity)
}

fn ensure_indexed<T: Data>(field: &str) -> Result<()> {
    if T::indexed_fields().contains(&field) {
        Ok(())
    } else {
        Err(anyhow!(
            "Field '{}' is not searchable on {}",
            field,
            T::resource_name()
        ))
    }
}

/// Whether a row other than `except` has `value` in `field`
fn is_taken<T: Data>(
    rows: &BTreeMap<i64, T>,
    field: &str,
    value: &str,
    except: Option<i64>,
) -> bool {
    rows.iter().any(|(pk, row)| {
        Some(*pk) != except && row.field_value(field).is_some_and(|v| v.matches(value))
    })
}

impl<T: Data> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(self.insert(&mut rows, entity))
    }

    async fn get(&self, pk: i64) -> Result<Option<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.get(&pk).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.values().cloned().collect())
    }

    async fn update(&self, pk: i64, entity: T) -> Result<T> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        replace(&mut rows, pk, entity)
    }

    async fn delete(&self, pk: i64) -> Result<Option<T>> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(rows.remove(&pk))
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        ensure_indexed::<T>(field)?;

        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows
            .values()
            .filter(|row| row.field_value(field).is_some_and(|v| v.matches(value)))
            .cloned()
            .collect())
    }

    async fn create_unique(&self, field: &str, value: &str, entity: T) -> Result<Option<T>> {
        ensure_indexed::<T>(field)?;

        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if is_taken(&rows, field, value, None) {
            return Ok(None);
        }
        Ok(Some(self.insert(&mut rows, entity)))
    }

    async fn update_unique(
        &self,
        pk: i64,
        field: &str,
        value: &str,
        entity: T,
    ) -> Result<Option<T>> {
        ensure_indexed::<T>(field)?;

        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if is_taken(&rows, field, value, Some(pk)) {
            return Ok(None);
        }
        replace(&mut rows, pk, entity).map(Some)
    }
}
