//! Loads planning area boundaries from `GeoJSON` `FeatureCollection`s.
//!
//! Uses a [`BoundaryFieldMapping`] to extract the area name and optional
//! population from each feature's properties, regardless of the
//! publisher-specific field naming. `GeoJSON` positions are `[lon, lat]`;
//! the swap to `(lat, lon)` happens here and nowhere else.

use std::collections::BTreeSet;

use geojson::{GeoJson, PolygonType, Value};
use transit_map_geography_models::{Boundary, BoundaryFieldMapping, GeoPoint, PlanningArea, Ring};

use crate::{GeoError, geometry};

/// Parses a `GeoJSON` `FeatureCollection` into planning areas.
///
/// Features with missing names, empty or non-polygonal geometry, or a name
/// already seen earlier in the collection are skipped with a warning.
/// Populations default to 0 when the mapping has no population field or the
/// feature lacks it; [`crate::registry::merge_populations`] can fill those
/// from the embedded registry afterwards.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn from_geojson(
    geojson_str: &str,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<PlanningArea>, GeoError> {
    let GeoJson::FeatureCollection(collection) = geojson_str.parse::<GeoJson>()? else {
        return Err(GeoError::Conversion {
            message: "boundary document is not a FeatureCollection".to_string(),
        });
    };

    let mut areas = Vec::new();
    let mut seen = BTreeSet::new();

    for feature in collection.features {
        let Some(area) = normalize_feature(&feature, fields) else {
            log::warn!("Skipping boundary feature without usable name/geometry");
            continue;
        };

        if !seen.insert(area.name.clone()) {
            log::warn!("Skipping duplicate planning area '{}'", area.name);
            continue;
        }

        areas.push(area);
    }

    log::info!("Loaded {} planning area boundaries", areas.len());
    Ok(areas)
}

/// Normalizes a single boundary feature.
fn normalize_feature(
    feature: &geojson::Feature,
    fields: &BoundaryFieldMapping,
) -> Option<PlanningArea> {
    let props = feature.properties.as_ref()?;

    let name = props
        .get(&fields.name)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let population = fields
        .population
        .as_ref()
        .and_then(|key| props.get(key))
        .and_then(parse_population)
        .unwrap_or(0);

    let geom = feature.geometry.as_ref()?;
    let rings = match &geom.value {
        Value::Polygon(polygon) => outer_ring(polygon).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.iter().filter_map(outer_ring).collect(),
        _ => {
            log::warn!("Planning area '{name}' has non-polygonal geometry");
            Vec::new()
        }
    };

    if rings.is_empty() {
        return None;
    }

    let centroid = geometry::ring_centroid(rings.first()?)?;

    Some(PlanningArea {
        name,
        centroid,
        population,
        boundary: Some(Boundary::new(rings)),
    })
}

/// Extracts the outer ring of a `GeoJSON` polygon, swapping each position
/// from `[lon, lat]` to `(lat, lon)`. Interior (hole) rings are discarded;
/// degenerate outer rings are dropped.
fn outer_ring(polygon: &PolygonType) -> Option<Ring> {
    let positions = polygon.first()?;

    let vertices: Vec<GeoPoint> = positions
        .iter()
        .filter_map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Some(GeoPoint::new(*lat, *lon)),
            _ => None,
        })
        .collect();

    let ring = Ring::new(vertices);
    if ring.is_degenerate() {
        log::debug!("Dropping degenerate boundary ring");
        return None;
    }

    Some(ring)
}

/// Parses a population property that may be numeric or a numeric string.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_population(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
