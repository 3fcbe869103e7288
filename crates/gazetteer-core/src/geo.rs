//! Great-circle distance on a sphere
//!
//! Distances use the haversine formula, which is numerically stable for
//! the small angles typical of address-book queries and degrades
//! gracefully at the antipodes.

use serde::{Deserialize, Serialize};

use crate::error::{GazetteerError, Result};
use crate::point::Point;

/// Mean Earth radius in kilometers (IUGG)
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// The sphere distances are measured on.
///
/// Defaults to the mean Earth radius; deployments that standardized on a
/// different radius configure their own. Deserialization goes through
/// [`Sphere::with_radius_km`], so a decoded sphere is always usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSphere")]
pub struct Sphere {
    radius_km: f64,
}

impl Sphere {
    /// Earth, using the mean radius of 6371 km
    pub const EARTH: Sphere = Sphere {
        radius_km: MEAN_EARTH_RADIUS_KM,
    };

    /// Create a sphere with a custom radius in kilometers.
    ///
    /// The radius must be a positive, finite number.
    pub fn with_radius_km(radius_km: f64) -> Result<Self> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(GazetteerError::InvalidConfig(format!(
                "sphere radius must be a positive number of kilometers, got {radius_km}"
            )));
        }
        Ok(Self { radius_km })
    }

    /// The sphere radius in kilometers
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Great-circle distance between two points in kilometers (haversine).
    ///
    /// Identical coordinates yield exactly 0. The intermediate term is
    /// clamped into [0, 1] so rounding near the antipodes can never
    /// produce NaN. Always non-negative and symmetric.
    pub fn distance_km(&self, a: Point, b: Point) -> f64 {
        let lat1 = a.latitude().to_radians();
        let lat2 = b.latitude().to_radians();
        let dlat = (b.latitude() - a.latitude()).to_radians();
        let dlon = (b.longitude() - a.longitude()).to_radians();

        let h = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let h = h.clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        self.radius_km * c
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EARTH
    }
}

// Unvalidated mirror used as the deserialization source for `Sphere`
#[derive(Deserialize)]
struct RawSphere {
    radius_km: f64,
}

impl TryFrom<RawSphere> for Sphere {
    type Error = GazetteerError;

    fn try_from(raw: RawSphere) -> Result<Self> {
        Sphere::with_radius_km(raw.radius_km)
    }
}
