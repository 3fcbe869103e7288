//! Geographic coordinate value type
//!
//! A [`Point`] is an immutable, validated latitude/longitude pair. The only
//! way to obtain one is through [`Point::new`], so every `Point` in the
//! system is known to hold in-range coordinates. Deserialization goes
//! through the same constructor.

use serde::{Deserialize, Serialize};

use crate::error::{GazetteerError, Result};
use crate::geo::Sphere;

/// Minimum valid latitude in degrees
pub const LATITUDE_MIN: f64 = -90.0;
/// Maximum valid latitude in degrees
pub const LATITUDE_MAX: f64 = 90.0;
/// Minimum valid longitude in degrees
pub const LONGITUDE_MIN: f64 = -180.0;
/// Maximum valid longitude in degrees
pub const LONGITUDE_MAX: f64 = 180.0;

/// A validated geographic coordinate pair in degrees.
///
/// Coordinates are fixed at construction; there is no way to mutate a
/// `Point` into an invalid state. Out-of-range input is rejected, never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

impl Point {
    /// Create a new point, validating both coordinates.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180], both
    /// finite. NaN and infinities are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || latitude < LATITUDE_MIN || latitude > LATITUDE_MAX {
            return Err(GazetteerError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || longitude < LONGITUDE_MIN || longitude > LONGITUDE_MAX {
            return Err(GazetteerError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometers, on the
    /// mean Earth sphere.
    pub fn distance_km(&self, other: Point) -> f64 {
        Sphere::EARTH.distance_km(*self, other)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

// Unvalidated mirror used as the deserialization source for `Point`
#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = GazetteerError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Point::new(raw.latitude, raw.longitude)
    }
}
