//! Gazetteer Core - Foundational types and search logic for the address book
//!
//! This crate provides the domain types and pure computation used
//! throughout the gazetteer: validated coordinates, great-circle
//! distances, the proximity search, and the storage collaborator trait.
//!
//! # Modules
//!
//! - [`point`] - Validated geographic coordinate value type
//! - [`address`] - Stored records, search requests, and matches
//! - [`geo`] - Great-circle distance on a configurable sphere
//! - [`search`] - Radius filtering, ordering, and origin resolution
//! - [`index`] - Grid spatial index for candidate pruning
//! - [`config`] - Configuration types
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust
//! use gazetteer_core::{Point, Sphere};
//!
//! let berlin = Point::new(52.5200, 13.4050)?;
//! let paris = Point::new(48.8566, 2.3522)?;
//!
//! let km = Sphere::EARTH.distance_km(berlin, paris);
//! assert!((km - 878.0).abs() < 2.0);
//! # Ok::<(), gazetteer_core::GazetteerError>(())
//! ```

// Domain modules
pub mod address;
pub mod geo;
pub mod index;
pub mod point;
pub mod search;

// Infrastructure modules
pub mod config;
pub mod error;

// Re-exports for convenience
pub use error::{GazetteerError, Result};

// Point re-exports
pub use point::Point;

// Address re-exports
pub use address::{Address, AddressId, ProximityMatch, SearchRequest};

// Geometry re-exports
pub use geo::{Sphere, MEAN_EARTH_RADIUS_KM};

// Search re-exports
pub use search::{find_nearby, resolve_origin};

// Index re-exports
pub use index::GridIndex;

// Config re-exports
pub use config::{GeoConfig, SearchConfig, ServiceConfig};

use async_trait::async_trait;

/// Trait for address persistence.
///
/// The search pipeline reads one snapshot through this trait and never
/// assumes the store stays consistent across multiple reads. Backends
/// own id assignment: ids start at 1, follow insertion order, and are
/// never reused.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Store a new address and assign it the next id
    async fn create(&self, point: Point) -> Result<Address>;

    /// Replace the coordinates of an existing address
    async fn update(&self, id: AddressId, point: Point) -> Result<Address>;

    /// Delete an address
    async fn delete(&self, id: AddressId) -> Result<()>;

    /// Retrieve a single address
    async fn get(&self, id: AddressId) -> Result<Option<Address>>;

    /// List every stored address, ordered by id
    async fn list_all(&self) -> Result<Vec<Address>>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is set at compile time from Cargo.toml
        assert!(VERSION.contains('.'), "VERSION should be semver format");
    }
}
