//! Gazetteer Service - the address book facade
//!
//! [`AddressBook`] wires a storage backend to the search pipeline. Record
//! operations pass through to the store; proximity searches read one
//! snapshot, resolve the origin within it, and filter with the exact
//! haversine check, pruning candidates through a grid index once the
//! snapshot outgrows the configured threshold. Both paths return
//! identical results.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use gazetteer_core::address::{Address, AddressId, ProximityMatch, SearchRequest};
use gazetteer_core::config::{SearchConfig, ServiceConfig};
use gazetteer_core::error::Result;
use gazetteer_core::geo::Sphere;
use gazetteer_core::index::GridIndex;
use gazetteer_core::point::Point;
use gazetteer_core::search::{find_nearby, resolve_origin};
use gazetteer_core::AddressStore;

/// The address book service: a storage collaborator plus validated
/// search configuration.
pub struct AddressBook {
    store: Arc<dyn AddressStore>,
    sphere: Sphere,
    search: SearchConfig,
}

impl AddressBook {
    /// Create a service over a store, validating the configuration
    pub fn new(store: Arc<dyn AddressStore>, config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let sphere = config.sphere()?;
        Ok(Self {
            store,
            sphere,
            search: config.search,
        })
    }

    /// The sphere distances are measured on
    pub fn sphere(&self) -> Sphere {
        self.sphere
    }

    /// Store a new address
    pub async fn add(&self, point: Point) -> Result<Address> {
        let address = self.store.create(point).await?;
        info!(id = %address.id, point = %address.point, "address added");
        Ok(address)
    }

    /// Move an existing address to new coordinates
    pub async fn update(&self, id: AddressId, point: Point) -> Result<Address> {
        let address = self.store.update(id, point).await?;
        info!(id = %address.id, point = %address.point, "address moved");
        Ok(address)
    }

    /// Delete an address
    pub async fn remove(&self, id: AddressId) -> Result<()> {
        self.store.delete(id).await?;
        info!(id = %id, "address removed");
        Ok(())
    }

    /// Retrieve a single address
    pub async fn get(&self, id: AddressId) -> Result<Option<Address>> {
        self.store.get(id).await
    }

    /// List every stored address, ordered by id
    pub async fn list(&self) -> Result<Vec<Address>> {
        self.store.list_all().await
    }

    /// Find every address within `radius_km` of the stored address
    /// `origin_id`, sorted nearest-first. The origin itself is never
    /// among the results.
    pub async fn find_nearby(
        &self,
        origin_id: AddressId,
        radius_km: f64,
    ) -> Result<Vec<ProximityMatch>> {
        self.search(SearchRequest::new(origin_id, radius_km)).await
    }

    /// Run a proximity search.
    ///
    /// Reads exactly one snapshot from the store; the origin is resolved
    /// within that same snapshot, so a search can never mix two states
    /// of the collection.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<ProximityMatch>> {
        request.validate()?;

        let snapshot = self.store.list_all().await?;
        let origin = resolve_origin(&snapshot, request.origin_id)?.point;

        let matches = if snapshot.len() >= self.search.index_threshold {
            let index = GridIndex::bulk_load(self.search.grid_cell_deg, &snapshot)?;
            let candidate_ids: HashSet<AddressId> = index
                .candidates_within(origin, request.radius_km, self.sphere)
                .into_iter()
                .map(|(id, _)| id)
                .collect();
            let pruned: Vec<Address> = snapshot
                .iter()
                .filter(|a| candidate_ids.contains(&a.id))
                .cloned()
                .collect();
            debug!(
                snapshot = snapshot.len(),
                pruned = pruned.len(),
                "grid index pruned candidates"
            );
            find_nearby(
                origin,
                request.radius_km,
                &pruned,
                Some(request.origin_id),
                self.sphere,
            )?
        } else {
            find_nearby(
                origin,
                request.radius_km,
                &snapshot,
                Some(request.origin_id),
                self.sphere,
            )?
        };

        debug!(
            origin = %request.origin_id,
            radius_km = request.radius_km,
            matches = matches.len(),
            "proximity search complete"
        );
        Ok(matches)
    }
}
