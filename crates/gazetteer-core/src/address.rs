//! Stored address records and search inputs/outputs
//!
//! An [`Address`] is a [`Point`] that has been admitted to the collection
//! and given an identifier by the storage collaborator. Searches consume
//! these records; they never create or destroy them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::point::Point;
use crate::search;

/// Unique identifier for a stored address.
///
/// Ids are assigned by the store in insertion order, starting at 1, and
/// are never reused within a store's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AddressId(pub i64);

impl AddressId {
    /// Get the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AddressId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A stored address: an identified point plus bookkeeping timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Unique record identifier
    pub id: AddressId,
    /// The stored coordinates
    pub point: Point,
    /// When this record was created
    pub created_at: DateTime<Utc>,
    /// When this record's coordinates last changed
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Create a new record with both timestamps set to now
    pub fn new(id: AddressId, point: Point) -> Self {
        let now = Utc::now();
        Self {
            id,
            point,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the coordinates and bump `updated_at`.
    ///
    /// The id and creation timestamp never change once assigned.
    pub fn relocate(&mut self, point: Point) {
        self.point = point;
        self.updated_at = Utc::now();
    }
}

/// A proximity query: find everything within `radius_km` of the stored
/// address identified by `origin_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Id of the stored address to measure from
    pub origin_id: AddressId,
    /// Inclusive search radius in kilometers
    pub radius_km: f64,
}

impl SearchRequest {
    /// Create a new request
    pub fn new(origin_id: AddressId, radius_km: f64) -> Self {
        Self {
            origin_id,
            radius_km,
        }
    }

    /// Validate the request parameters.
    ///
    /// The radius must be non-negative and not NaN. Positive infinity is
    /// permitted (every stored point is within it).
    pub fn validate(&self) -> Result<()> {
        search::validate_radius(self.radius_km)
    }
}

/// A single search result: the matched record and its distance from the
/// search origin.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityMatch {
    /// The matched record
    pub address: Address,
    /// Great-circle distance from the origin in kilometers
    pub distance_km: f64,
}
