//! Configuration types for the gazetteer
//!
//! This module provides configuration structures for the distance
//! geometry and the search pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{GazetteerError, Result};
use crate::geo::{Sphere, MEAN_EARTH_RADIUS_KM};
use crate::index;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Distance geometry configuration
    #[serde(default)]
    pub geo: GeoConfig,
    /// Search pipeline configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            geo: GeoConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Validate every section, failing with the first problem found
    pub fn validate(&self) -> Result<()> {
        self.geo.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// The sphere distances are measured on
    pub fn sphere(&self) -> Result<Sphere> {
        Sphere::with_radius_km(self.geo.earth_radius_km)
    }
}

/// Distance geometry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Sphere radius used for distance calculations, in kilometers
    #[serde(default = "default_earth_radius_km")]
    pub earth_radius_km: f64,
}

fn default_earth_radius_km() -> f64 {
    MEAN_EARTH_RADIUS_KM
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: MEAN_EARTH_RADIUS_KM,
        }
    }
}

impl GeoConfig {
    /// Check that the configured radius describes a usable sphere
    pub fn validate(&self) -> Result<()> {
        Sphere::with_radius_km(self.earth_radius_km)?;
        Ok(())
    }
}

/// Search pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Snapshot size at which searches switch from a plain linear scan
    /// to grid-pruned scanning
    #[serde(default = "default_index_threshold")]
    pub index_threshold: usize,
    /// Cell edge of the pruning grid, in degrees
    #[serde(default = "default_grid_cell_deg")]
    pub grid_cell_deg: f64,
}

fn default_index_threshold() -> usize {
    256
}

fn default_grid_cell_deg() -> f64 {
    1.0
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_threshold: 256,
            grid_cell_deg: 1.0,
        }
    }
}

impl SearchConfig {
    /// Check that the grid parameters can actually build a grid
    pub fn validate(&self) -> Result<()> {
        if !self.grid_cell_deg.is_finite()
            || self.grid_cell_deg < index::MIN_CELL_DEG
            || self.grid_cell_deg > index::MAX_CELL_DEG
        {
            return Err(GazetteerError::InvalidConfig(format!(
                "grid_cell_deg must be between {} and {} degrees, got {}",
                index::MIN_CELL_DEG,
                index::MAX_CELL_DEG,
                self.grid_cell_deg
            )));
        }
        Ok(())
    }
}
