//! In-memory address store
//!
//! This module provides the reference [`AddressStore`] backend: a
//! read/write-locked map keyed by id, with a monotonic counter for id
//! assignment. Snapshots are owned clones, so readers never observe a
//! record mid-update.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use gazetteer_core::address::{Address, AddressId};
use gazetteer_core::error::{GazetteerError, Result};
use gazetteer_core::point::Point;
use gazetteer_core::AddressStore;

/// In-memory [`AddressStore`] backend.
///
/// Ids start at 1, follow insertion order, and are never reused even
/// after deletes. Safe to share across tasks.
pub struct MemoryStore {
    addresses: RwLock<HashMap<AddressId, Address>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            addresses: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored addresses
    pub fn len(&self) -> usize {
        self.addresses.read().len()
    }

    /// Whether the store holds no addresses
    pub fn is_empty(&self) -> bool {
        self.addresses.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn create(&self, point: Point) -> Result<Address> {
        let id = AddressId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let address = Address::new(id, point);
        self.addresses.write().insert(id, address.clone());
        debug!(id = %id, point = %point, "created address");
        Ok(address)
    }

    async fn update(&self, id: AddressId, point: Point) -> Result<Address> {
        let mut addresses = self.addresses.write();
        let address = addresses
            .get_mut(&id)
            .ok_or(GazetteerError::AddressNotFound(id))?;
        address.relocate(point);
        let updated = address.clone();
        drop(addresses);
        debug!(id = %id, point = %point, "updated address");
        Ok(updated)
    }

    async fn delete(&self, id: AddressId) -> Result<()> {
        let removed = self.addresses.write().remove(&id);
        if removed.is_none() {
            return Err(GazetteerError::AddressNotFound(id));
        }
        debug!(id = %id, "deleted address");
        Ok(())
    }

    async fn get(&self, id: AddressId) -> Result<Option<Address>> {
        Ok(self.addresses.read().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Address>> {
        let mut all: Vec<Address> = self.addresses.read().values().cloned().collect();
        all.sort_by_key(|a| a.id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn p(lat: f64, lon: f64) -> Point {
        Point::new(lat, lon).unwrap()
    }

    // ============ Creation ============

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create(p(52.52, 13.405)).await.unwrap();
        let b = store.create(p(48.8566, 2.3522)).await.unwrap();
        let c = store.create(p(51.5074, -0.1278)).await.unwrap();

        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert_eq!(c.id.value(), 3);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let store = MemoryStore::new();
        let addr = store.create(p(0.0, 0.0)).await.unwrap();
        assert_eq!(addr.created_at, addr.updated_at);
    }

    #[tokio::test]
    async fn test_concurrent_creates_assign_unique_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(p(i as f64, i as f64)).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().value());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    // ============ Lookup ============

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let store = MemoryStore::new();
        let created = store.create(p(10.0, 20.0)).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.point, created.point);

        let missing = store.get(AddressId::from(999)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_id() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store.create(p(i as f64, i as f64)).await.unwrap();
        }

        let all = store.list_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let store = MemoryStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    // ============ Update ============

    #[tokio::test]
    async fn test_update_replaces_coordinates() {
        let store = MemoryStore::new();
        let created = store.create(p(10.0, 20.0)).await.unwrap();

        let moved = store.update(created.id, p(30.0, 40.0)).await.unwrap();
        assert_eq!(moved.id, created.id);
        assert_eq!(moved.point, p(30.0, 40.0));
        assert_eq!(moved.created_at, created.created_at);
        assert!(moved.updated_at >= created.updated_at);

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.point, p(30.0, 40.0));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update(AddressId::from(7), p(0.0, 0.0)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    // ============ Delete ============

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryStore::new();
        let created = store.create(p(10.0, 20.0)).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete(AddressId::from(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_ids_never_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create(p(1.0, 1.0)).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(p(2.0, 2.0)).await.unwrap();
        assert_eq!(second.id.value(), 2);
    }

    #[tokio::test]
    async fn test_deleted_id_stays_dead_for_updates() {
        let store = MemoryStore::new();
        let created = store.create(p(1.0, 1.0)).await.unwrap();
        store.delete(created.id).await.unwrap();

        let err = store.update(created.id, p(2.0, 2.0)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
