//! Loads facility point locations from `GeoJSON`.
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry.
//! Positions are swapped from `GeoJSON` `[lon, lat]` to `(lat, lon)`.
//! Coordinate validity is not checked here; area resolution treats invalid
//! points as unmatched rather than erroring.

use geojson::{GeoJson, Geometry, Value};
use transit_map_geography_models::GeoPoint;

use crate::GeoError;

/// Parses facility points from a `GeoJSON` document.
///
/// `Point` and `MultiPoint` geometries contribute points; other geometry
/// types are skipped with a warning.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not valid `GeoJSON`.
pub fn from_geojson(geojson_str: &str) -> Result<Vec<GeoPoint>, GeoError> {
    let mut points = Vec::new();

    match geojson_str.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                if let Some(geom) = feature.geometry.as_ref() {
                    collect_points(geom, &mut points);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geom) = feature.geometry.as_ref() {
                collect_points(geom, &mut points);
            }
        }
        GeoJson::Geometry(geom) => collect_points(&geom, &mut points),
    }

    log::info!("Loaded {} facility points", points.len());
    Ok(points)
}

fn collect_points(geom: &Geometry, points: &mut Vec<GeoPoint>) {
    match &geom.value {
        Value::Point(pos) => {
            if let [lon, lat, ..] = pos.as_slice() {
                points.push(GeoPoint::new(*lat, *lon));
            }
        }
        Value::MultiPoint(positions) => {
            for pos in positions {
                if let [lon, lat, ..] = pos.as_slice() {
                    points.push(GeoPoint::new(*lat, *lon));
                }
            }
        }
        other => log::warn!(
            "Skipping non-point geometry in facility feed: {}",
            other.type_name()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_point_features_with_axis_swap() {
        let doc = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[103.85,1.29]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[103.70,1.34]}}]}"#;
        let points = from_geojson(doc).unwrap();

        assert_eq!(points.len(), 2);
        assert!((points[0].lat - 1.29).abs() < f64::EPSILON);
        assert!((points[0].lon - 103.85).abs() < f64::EPSILON);
    }

    #[test]
    fn loads_multi_point_geometry() {
        let doc = r#"{"type":"MultiPoint","coordinates":[[103.85,1.29],[103.70,1.34],[103.95,1.37]]}"#;
        let points = from_geojson(doc).unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn skips_non_point_geometry() {
        let doc = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[103.8,1.3],[103.9,1.4]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[103.85,1.29]}}]}"#;
        let points = from_geojson(doc).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(from_geojson("not geojson").is_err());
    }
}
