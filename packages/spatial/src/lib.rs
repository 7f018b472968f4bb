#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index for planning area attribution.
//!
//! Builds an R-tree over boundary envelopes at construction and provides
//! fast point-to-area lookups: exact polygon containment first, then
//! nearest-centroid fallback within a fixed radius. Used by both the
//! aggregation step and the export pipeline.

use rstar::{AABB, RTree, RTreeObject};
use transit_map_geography::geometry;
use transit_map_geography_models::{GeoPoint, PlanningArea};

/// Maximum centroid distance, in kilometres, for the nearest-area fallback.
/// Points farther than this from every centroid resolve to no area.
pub const FALLBACK_RADIUS_KM: f64 = 3.0;

/// A boundary envelope stored in the R-tree, keyed back to its area.
///
/// `area_index` is the position in the original area list. It doubles as
/// the tie-break for overlapping boundaries: the R-tree returns candidates
/// in unspecified order, so containment keeps the smallest index to
/// preserve first-match-wins over the caller's area ordering.
struct BoundaryEntry {
    area_index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for BoundaryEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built index over a snapshot of planning areas.
///
/// Constructed once per dataset and shared read-only across consumers;
/// lookups never mutate. Reloading area data means building a new index.
pub struct AreaIndex {
    areas: Vec<PlanningArea>,
    boundaries: RTree<BoundaryEntry>,
}

impl AreaIndex {
    /// Builds the index from a snapshot of planning areas.
    ///
    /// Areas without boundaries (or with only degenerate rings) are kept
    /// for centroid fallback but contribute nothing to the R-tree.
    #[must_use]
    pub fn new(areas: Vec<PlanningArea>) -> Self {
        let entries: Vec<BoundaryEntry> = areas
            .iter()
            .enumerate()
            .filter_map(|(area_index, area)| {
                let boundary = area.boundary.as_ref()?;
                let (min, max) = geometry::boundary_bounds(boundary)?;
                Some(BoundaryEntry {
                    area_index,
                    envelope: AABB::from_corners([min.lat, min.lon], [max.lat, max.lon]),
                })
            })
            .collect();

        log::info!(
            "Indexed {} boundary envelopes across {} planning areas",
            entries.len(),
            areas.len()
        );

        Self {
            areas,
            boundaries: RTree::bulk_load(entries),
        }
    }

    /// Resolves a point to the name of its enclosing planning area.
    ///
    /// Containment uses the even-odd rule over outer rings; overlapping
    /// boundaries resolve to the earliest area in construction order. When
    /// no boundary contains the point, the nearest centroid wins if it is
    /// closer than [`FALLBACK_RADIUS_KM`]. Invalid coordinates and empty
    /// area sets resolve to `None`; this never fails.
    #[must_use]
    pub fn resolve(&self, point: GeoPoint) -> Option<&str> {
        if !point.is_valid() {
            return None;
        }

        let query = AABB::from_point([point.lat, point.lon]);
        let mut first_match: Option<usize> = None;

        for entry in self.boundaries.locate_in_envelope_intersecting(&query) {
            if first_match.is_some_and(|index| index < entry.area_index) {
                continue;
            }
            let area = &self.areas[entry.area_index];
            if let Some(boundary) = area.boundary.as_ref()
                && geometry::boundary_contains(boundary, point)
            {
                first_match = Some(entry.area_index);
            }
        }

        if let Some(index) = first_match {
            return Some(&self.areas[index].name);
        }

        self.nearest_within_radius(point)
    }

    /// Nearest-centroid fallback, strict `< FALLBACK_RADIUS_KM`.
    fn nearest_within_radius(&self, point: GeoPoint) -> Option<&str> {
        let mut nearest: Option<(usize, f64)> = None;

        for (index, area) in self.areas.iter().enumerate() {
            let distance = geometry::haversine_km(point, area.centroid);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }

        match nearest {
            Some((index, distance)) if distance < FALLBACK_RADIUS_KM => {
                Some(&self.areas[index].name)
            }
            _ => None,
        }
    }

    /// The indexed area snapshot, in construction order.
    #[must_use]
    pub fn areas(&self) -> &[PlanningArea] {
        &self.areas
    }

    /// Number of indexed areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Returns `true` if the index holds no areas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_map_geography_models::{Boundary, Ring};

    fn square(min_lat: f64, min_lon: f64, size: f64) -> Boundary {
        Boundary::new(vec![Ring::new(vec![
            GeoPoint::new(min_lat, min_lon),
            GeoPoint::new(min_lat, min_lon + size),
            GeoPoint::new(min_lat + size, min_lon + size),
            GeoPoint::new(min_lat + size, min_lon),
        ])])
    }

    fn area(name: &str, centroid: GeoPoint, population: u64, boundary: Option<Boundary>) -> PlanningArea {
        PlanningArea {
            name: name.to_string(),
            centroid,
            population,
            boundary,
        }
    }

    #[test]
    fn resolves_point_inside_boundary() {
        let index = AreaIndex::new(vec![area(
            "Square",
            GeoPoint::new(5.0, 5.0),
            100,
            Some(square(0.0, 0.0, 10.0)),
        )]);
        assert_eq!(index.resolve(GeoPoint::new(5.0, 5.0)), Some("Square"));
    }

    #[test]
    fn point_outside_boundary_falls_through_to_fallback() {
        let index = AreaIndex::new(vec![area(
            "Square",
            GeoPoint::new(5.0, 5.0),
            100,
            Some(square(0.0, 0.0, 10.0)),
        )]);
        // (15, 15) misses the polygon and is far from the centroid too.
        assert_eq!(index.resolve(GeoPoint::new(15.0, 15.0)), None);
    }

    #[test]
    fn fallback_matches_inside_radius() {
        let index = AreaIndex::new(vec![area("Near", GeoPoint::new(0.0, 0.0), 100, None)]);
        // 0.0269 degrees of latitude is about 2.99 km.
        assert_eq!(index.resolve(GeoPoint::new(0.0269, 0.0)), Some("Near"));
    }

    #[test]
    fn fallback_rejects_outside_radius() {
        let index = AreaIndex::new(vec![area("Near", GeoPoint::new(0.0, 0.0), 100, None)]);
        // 0.0280 degrees of latitude is about 3.11 km.
        assert_eq!(index.resolve(GeoPoint::new(0.0280, 0.0)), None);
    }

    #[test]
    fn fallback_picks_nearest_centroid() {
        let index = AreaIndex::new(vec![
            area("Far", GeoPoint::new(0.02, 0.0), 100, None),
            area("Close", GeoPoint::new(0.005, 0.0), 100, None),
        ]);
        assert_eq!(index.resolve(GeoPoint::new(0.0, 0.0)), Some("Close"));
    }

    #[test]
    fn overlapping_boundaries_resolve_to_first_area() {
        // Both squares contain (5, 5); construction order decides.
        let index = AreaIndex::new(vec![
            area("First", GeoPoint::new(5.0, 5.0), 100, Some(square(0.0, 0.0, 10.0))),
            area("Second", GeoPoint::new(5.0, 5.0), 100, Some(square(4.0, 4.0, 2.0))),
        ]);
        assert_eq!(index.resolve(GeoPoint::new(5.0, 5.0)), Some("First"));

        let reversed = AreaIndex::new(vec![
            area("Second", GeoPoint::new(5.0, 5.0), 100, Some(square(4.0, 4.0, 2.0))),
            area("First", GeoPoint::new(5.0, 5.0), 100, Some(square(0.0, 0.0, 10.0))),
        ]);
        assert_eq!(reversed.resolve(GeoPoint::new(5.0, 5.0)), Some("Second"));
    }

    #[test]
    fn containment_beats_nearer_centroid() {
        // The point is inside First's polygon even though Second's centroid
        // is closer; containment always wins over fallback.
        let index = AreaIndex::new(vec![
            area("First", GeoPoint::new(50.0, 50.0), 100, Some(square(0.0, 0.0, 10.0))),
            area("Second", GeoPoint::new(9.001, 9.001), 100, None),
        ]);
        assert_eq!(index.resolve(GeoPoint::new(9.0, 9.0)), Some("First"));
    }

    #[test]
    fn invalid_point_resolves_to_none() {
        let index = AreaIndex::new(vec![area(
            "Square",
            GeoPoint::new(5.0, 5.0),
            100,
            Some(square(0.0, 0.0, 10.0)),
        )]);
        assert_eq!(index.resolve(GeoPoint::new(91.0, 5.0)), None);
        assert_eq!(index.resolve(GeoPoint::new(f64::NAN, 5.0)), None);
    }

    #[test]
    fn empty_area_set_resolves_to_none() {
        let index = AreaIndex::new(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.resolve(GeoPoint::new(1.35, 103.82)), None);
    }

    #[test]
    fn zero_population_area_still_resolves() {
        let index = AreaIndex::new(vec![area(
            "Uninhabited",
            GeoPoint::new(5.0, 5.0),
            0,
            Some(square(0.0, 0.0, 10.0)),
        )]);
        assert_eq!(index.resolve(GeoPoint::new(5.0, 5.0)), Some("Uninhabited"));
    }

    #[test]
    fn degenerate_rings_never_match() {
        let degenerate = Boundary::new(vec![Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 10.0),
        ])]);
        let index = AreaIndex::new(vec![area(
            "Sliver",
            GeoPoint::new(50.0, 50.0),
            100,
            Some(degenerate),
        )]);
        assert_eq!(index.resolve(GeoPoint::new(5.0, 5.0)), None);
    }
}
