//! Grid spatial index for candidate pruning
//!
//! [`GridIndex`] buckets points into fixed-size latitude/longitude cells
//! and answers radius queries by scanning only the cells that intersect
//! the query's bounding box. The result is a conservative superset: the
//! exact haversine filter in [`crate::search::find_nearby`] makes the
//! final call. Pruning never changes which points match, only how many
//! distances get computed.

use std::collections::{BTreeSet, HashMap};

use crate::address::{Address, AddressId};
use crate::error::{GazetteerError, Result};
use crate::geo::Sphere;
use crate::point::Point;

/// Smallest permitted cell edge in degrees
pub const MIN_CELL_DEG: f64 = 0.01;
/// Largest permitted cell edge in degrees
pub const MAX_CELL_DEG: f64 = 360.0;

/// A uniform degree grid over the sphere.
///
/// Cells are addressed by `(row, column)` where rows follow latitude and
/// columns follow longitude normalized into [0, 360). Entries are
/// `(id, point)` pairs; the id ties a pruned candidate back to its
/// stored record.
#[derive(Debug, Clone)]
pub struct GridIndex {
    cell_deg: f64,
    lon_cols: i32,
    cells: HashMap<(i32, i32), Vec<(AddressId, Point)>>,
    len: usize,
}

impl GridIndex {
    /// Create an empty grid with the given cell edge in degrees.
    pub fn new(cell_deg: f64) -> Result<Self> {
        if !cell_deg.is_finite() || cell_deg < MIN_CELL_DEG || cell_deg > MAX_CELL_DEG {
            return Err(GazetteerError::InvalidConfig(format!(
                "grid cell size must be between {MIN_CELL_DEG} and {MAX_CELL_DEG} degrees, \
                 got {cell_deg}"
            )));
        }
        let lon_cols = ((360.0 / cell_deg).ceil() as i32).max(1);
        Ok(Self {
            cell_deg,
            lon_cols,
            cells: HashMap::new(),
            len: 0,
        })
    }

    /// Build a grid from a snapshot of stored addresses.
    pub fn bulk_load(cell_deg: f64, addresses: &[Address]) -> Result<Self> {
        let mut index = Self::new(cell_deg)?;
        for addr in addresses {
            index.insert(addr.id, addr.point);
        }
        Ok(index)
    }

    /// Insert an entry. Ids are expected to be unique; the store upholds
    /// that, the index does not re-check it.
    pub fn insert(&mut self, id: AddressId, point: Point) {
        let cell = self.cell_of(point);
        self.cells.entry(cell).or_default().push((id, point));
        self.len += 1;
    }

    /// Remove an entry by id. `point` must be the coordinates the entry
    /// was inserted with, since they locate its cell.
    pub fn remove(&mut self, id: AddressId, point: Point) -> bool {
        let cell = self.cell_of(point);
        let Some(entries) = self.cells.get_mut(&cell) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|(eid, _)| *eid == id) else {
            return false;
        };
        entries.swap_remove(pos);
        if entries.is_empty() {
            self.cells.remove(&cell);
        }
        self.len -= 1;
        true
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a superset of the entries within `radius_km` of `origin`.
    ///
    /// Every in-range entry is included; out-of-range entries from the
    /// scanned cells may be too. Callers validate the radius upstream; a
    /// negative or NaN radius yields no candidates here, matching the
    /// empty result the exact filter would produce.
    pub fn candidates_within(
        &self,
        origin: Point,
        radius_km: f64,
        sphere: Sphere,
    ) -> Vec<(AddressId, Point)> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }

        let ang_deg = (radius_km / sphere.radius_km()).to_degrees();
        let lat_min = origin.latitude() - ang_deg;
        let lat_max = origin.latitude() + ang_deg;

        // Radius spans pole to pole: every cell is in range
        if lat_min <= -90.0 && lat_max >= 90.0 {
            return self.cells.values().flatten().copied().collect();
        }

        // A cap that contains a pole wraps all the way around
        let covers_pole = lat_min <= -90.0 || lat_max >= 90.0;

        // Longitude half-width of the cap. The cap widens toward the
        // poles, so the naive `radius / cos(lat)` box loses candidates
        // at its edge; the asin of the ratio is the exact bound.
        let lon_half = if covers_pole {
            180.0
        } else {
            let r = radius_km / sphere.radius_km();
            let ratio = r.sin() / origin.latitude().to_radians().cos();
            ratio.min(1.0).asin().to_degrees()
        };

        let row_lo = self.lat_row(lat_min.max(-90.0));
        let row_hi = self.lat_row(lat_max.min(90.0));
        let cols = self.lon_columns(origin.longitude(), lon_half);

        let mut out = Vec::new();
        for row in row_lo..=row_hi {
            for &col in &cols {
                if let Some(entries) = self.cells.get(&(row, col)) {
                    out.extend(entries.iter().copied());
                }
            }
        }
        out
    }

    fn cell_of(&self, point: Point) -> (i32, i32) {
        (
            self.lat_row(point.latitude()),
            self.lon_col(point.longitude()),
        )
    }

    fn lat_row(&self, lat: f64) -> i32 {
        (lat / self.cell_deg).floor() as i32
    }

    fn lon_col(&self, lon: f64) -> i32 {
        // rem_euclid folds -180 and 180 onto the same column
        ((lon.rem_euclid(360.0)) / self.cell_deg).floor() as i32
    }

    /// Columns intersecting the longitude band around `origin_lon`.
    ///
    /// The band is split at the 0/360 seam instead of taking cell
    /// indices modulo the column count, which would misalign whenever
    /// the cell size does not divide 360 evenly.
    fn lon_columns(&self, origin_lon: f64, lon_half: f64) -> Vec<i32> {
        if lon_half >= 180.0 {
            return (0..self.lon_cols).collect();
        }

        let cell = self.cell_deg;
        let last = self.lon_cols - 1;
        let mut cols: BTreeSet<i32> = BTreeSet::new();
        let mut add_band = |from: f64, to: f64| {
            let lo = ((from / cell).floor() as i32).max(0);
            let hi = ((to / cell).floor() as i32).min(last);
            for col in lo..=hi {
                cols.insert(col);
            }
        };

        let norm = origin_lon.rem_euclid(360.0);
        let from = norm - lon_half;
        let to = norm + lon_half;
        if from < 0.0 {
            add_band(from + 360.0, 360.0);
            add_band(0.0, to);
        } else if to >= 360.0 {
            add_band(from, 360.0);
            add_band(0.0, to - 360.0);
        } else {
            add_band(from, to);
        }

        cols.into_iter().collect()
    }
}
