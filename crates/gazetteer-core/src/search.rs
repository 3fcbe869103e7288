//! Proximity search over a snapshot of stored addresses
//!
//! The search is a pure function of its inputs: it takes the candidate
//! snapshot it is given, measures every candidate against the origin, and
//! returns the matches sorted nearest-first. It never mutates the
//! collection and never returns partial results on error.

use crate::address::{Address, AddressId, ProximityMatch};
use crate::error::{GazetteerError, Result};
use crate::geo::Sphere;
use crate::point::Point;

/// Reject a radius that is negative or NaN. Positive infinity passes.
pub(crate) fn validate_radius(radius_km: f64) -> Result<()> {
    if radius_km.is_nan() || radius_km < 0.0 {
        return Err(GazetteerError::InvalidRadius(radius_km));
    }
    Ok(())
}

/// Find the origin record within a candidate snapshot.
///
/// Searches measure from a *stored* address, so an id that does not
/// resolve in the snapshot fails with [`GazetteerError::AddressNotFound`]
/// before any distance is computed.
pub fn resolve_origin(candidates: &[Address], origin_id: AddressId) -> Result<&Address> {
    candidates
        .iter()
        .find(|a| a.id == origin_id)
        .ok_or(GazetteerError::AddressNotFound(origin_id))
}

/// Return every candidate within `radius_km` of `origin`, sorted by
/// ascending distance (ties broken by ascending id).
///
/// The boundary is inclusive: a candidate exactly `radius_km` away
/// matches. A candidate whose id equals `exclude` is skipped even when
/// its distance is 0, so an origin never matches itself. A radius of 0
/// matches only exact coordinate duplicates.
pub fn find_nearby(
    origin: Point,
    radius_km: f64,
    candidates: &[Address],
    exclude: Option<AddressId>,
    sphere: Sphere,
) -> Result<Vec<ProximityMatch>> {
    validate_radius(radius_km)?;

    let mut matches: Vec<ProximityMatch> = candidates
        .iter()
        .filter(|a| Some(a.id) != exclude)
        .map(|a| ProximityMatch {
            address: a.clone(),
            distance_km: sphere.distance_km(origin, a.point),
        })
        .filter(|m| m.distance_km <= radius_km)
        .collect();

    matches.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.address.id.cmp(&b.address.id))
    });

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: i64, lat: f64, lon: f64) -> Address {
        Address::new(AddressId::from(id), Point::new(lat, lon).unwrap())
    }

    fn ids(matches: &[ProximityMatch]) -> Vec<i64> {
        matches.iter().map(|m| m.address.id.value()).collect()
    }

    // ============ Origin Resolution ============

    #[test]
    fn test_resolve_origin_found() {
        let candidates = vec![addr(1, 52.5200, 13.4050), addr(2, 48.8566, 2.3522)];
        let origin = resolve_origin(&candidates, AddressId::from(2)).unwrap();
        assert_eq!(origin.id.value(), 2);
    }

    #[test]
    fn test_resolve_origin_missing() {
        let candidates = vec![addr(1, 52.5200, 13.4050)];
        let err = resolve_origin(&candidates, AddressId::from(99)).unwrap_err();
        assert!(matches!(err, GazetteerError::AddressNotFound(id) if id.value() == 99));
    }

    #[test]
    fn test_resolve_origin_empty_snapshot() {
        let err = resolve_origin(&[], AddressId::from(1)).unwrap_err();
        assert!(err.is_not_found());
    }

    // ============ Radius Filtering ============

    #[test]
    fn test_berlin_paris_london() {
        // Paris is ~878 km from Berlin, London ~932 km; a 900 km radius
        // keeps only Paris
        let berlin = Point::new(52.5200, 13.4050).unwrap();
        let candidates = vec![addr(2, 48.8566, 2.3522), addr(3, 51.5074, -0.1278)];

        let matches =
            find_nearby(berlin, 900.0, &candidates, Some(AddressId::from(1)), Sphere::EARTH)
                .unwrap();

        assert_eq!(ids(&matches), vec![2]);
        assert!((matches[0].distance_km - 878.0).abs() < 2.0);
    }

    #[test]
    fn test_inclusive_boundary() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let candidates = vec![addr(1, 0.0, 1.0)];
        let exact = Sphere::EARTH.distance_km(origin, candidates[0].point);

        let matches = find_nearby(origin, exact, &candidates, None, Sphere::EARTH).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_zero_radius_matches_only_duplicates() {
        let origin = Point::new(52.5200, 13.4050).unwrap();
        let candidates = vec![
            addr(1, 52.5200, 13.4050), // the origin record itself
            addr(2, 52.5200, 13.4050), // exact duplicate
            addr(3, 52.5201, 13.4050), // ~11 m away
        ];

        let matches =
            find_nearby(origin, 0.0, &candidates, Some(AddressId::from(1)), Sphere::EARTH)
                .unwrap();

        assert_eq!(ids(&matches), vec![2]);
        assert_eq!(matches[0].distance_km, 0.0);
    }

    #[test]
    fn test_origin_excluded_even_at_distance_zero() {
        let origin = Point::new(10.0, 20.0).unwrap();
        let candidates = vec![addr(7, 10.0, 20.0)];

        let matches =
            find_nearby(origin, 1000.0, &candidates, Some(AddressId::from(7)), Sphere::EARTH)
                .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_no_exclusion_when_exclude_is_none() {
        let origin = Point::new(10.0, 20.0).unwrap();
        let candidates = vec![addr(7, 10.0, 20.0)];

        let matches = find_nearby(origin, 1.0, &candidates, None, Sphere::EARTH).unwrap();
        assert_eq!(ids(&matches), vec![7]);
    }

    #[test]
    fn test_empty_candidates() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let matches = find_nearby(origin, 100.0, &[], None, Sphere::EARTH).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_infinite_radius_matches_everything() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let candidates = vec![addr(1, 89.0, 0.0), addr(2, -89.0, 179.0)];

        let matches =
            find_nearby(origin, f64::INFINITY, &candidates, None, Sphere::EARTH).unwrap();
        assert_eq!(matches.len(), 2);
    }

    // ============ Validation ============

    #[test]
    fn test_negative_radius_rejected() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let err = find_nearby(origin, -5.0, &[], None, Sphere::EARTH).unwrap_err();
        assert!(matches!(err, GazetteerError::InvalidRadius(r) if r == -5.0));
    }

    #[test]
    fn test_nan_radius_rejected() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let err = find_nearby(origin, f64::NAN, &[], None, Sphere::EARTH).unwrap_err();
        assert!(err.is_invalid_input());
    }

    // ============ Ordering ============

    #[test]
    fn test_results_sorted_by_ascending_distance() {
        let origin = Point::new(0.0, 0.0).unwrap();
        // Deliberately out of order by distance
        let candidates = vec![
            addr(1, 0.0, 3.0),
            addr(2, 0.0, 1.0),
            addr(3, 0.0, 2.0),
        ];

        let matches = find_nearby(origin, 500.0, &candidates, None, Sphere::EARTH).unwrap();
        assert_eq!(ids(&matches), vec![2, 3, 1]);
        assert!(matches[0].distance_km <= matches[1].distance_km);
        assert!(matches[1].distance_km <= matches[2].distance_km);
    }

    #[test]
    fn test_equidistant_ties_break_by_id() {
        let origin = Point::new(0.0, 0.0).unwrap();
        // Same coordinates, so identical distances
        let candidates = vec![
            addr(9, 0.0, 1.0),
            addr(3, 0.0, 1.0),
            addr(6, 0.0, 1.0),
        ];

        let matches = find_nearby(origin, 500.0, &candidates, None, Sphere::EARTH).unwrap();
        assert_eq!(ids(&matches), vec![3, 6, 9]);
    }
}
