//! Distance and containment primitives.
//!
//! These are the behavioral contract of area resolution, so they are written
//! out rather than delegated: containment is the even-odd crossing-number
//! rule over outer rings only (holes are not modeled), and distances use the
//! haversine formula with an Earth radius of exactly 6371 km.

use transit_map_geography_models::{Boundary, GeoPoint, Ring};

/// Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine).
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Tests whether a point lies inside a ring using the even-odd rule.
///
/// Casts a ray of constant latitude and counts edge crossings; an odd count
/// is inside. The ring is closed implicitly, so the first vertex need not
/// repeat at the end. Degenerate rings (fewer than 3 vertices) never contain
/// anything. Points exactly on an edge or vertex get whatever the crossing
/// count yields; behavior at boundaries is a known limitation of this rule
/// and is deliberately not special-cased.
#[must_use]
pub fn ring_contains(ring: &Ring, point: GeoPoint) -> bool {
    if ring.is_degenerate() {
        return false;
    }

    let verts = &ring.vertices;
    let mut inside = false;
    let mut j = verts.len() - 1;

    for i in 0..verts.len() {
        let (vi, vj) = (verts[i], verts[j]);
        if ((vi.lat > point.lat) != (vj.lat > point.lat))
            && point.lon < (vj.lon - vi.lon) * (point.lat - vi.lat) / (vj.lat - vi.lat) + vi.lon
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Tests whether a point lies inside any outer ring of a boundary.
#[must_use]
pub fn boundary_contains(boundary: &Boundary, point: GeoPoint) -> bool {
    boundary.rings.iter().any(|ring| ring_contains(ring, point))
}

/// Axis-aligned bounds of a boundary as `(min, max)` corner points, or
/// `None` when the boundary has no non-degenerate rings.
#[must_use]
pub fn boundary_bounds(boundary: &Boundary) -> Option<(GeoPoint, GeoPoint)> {
    let mut bounds: Option<(GeoPoint, GeoPoint)> = None;

    for vertex in boundary
        .rings
        .iter()
        .filter(|ring| !ring.is_degenerate())
        .flat_map(|ring| ring.vertices.iter())
    {
        bounds = Some(match bounds {
            None => (*vertex, *vertex),
            Some((min, max)) => (
                GeoPoint::new(min.lat.min(vertex.lat), min.lon.min(vertex.lon)),
                GeoPoint::new(max.lat.max(vertex.lat), max.lon.max(vertex.lon)),
            ),
        });
    }

    bounds
}

/// Vertex mean of a ring, used as a derived centroid when no authoritative
/// centroid is supplied. Returns `None` for empty rings.
#[must_use]
pub fn ring_centroid(ring: &Ring) -> Option<GeoPoint> {
    if ring.vertices.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = ring.vertices.len() as f64;
    let lat = ring.vertices.iter().map(|v| v.lat).sum::<f64>() / n;
    let lon = ring.vertices.iter().map(|v| v.lon).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lon))
}
