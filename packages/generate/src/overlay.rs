//! Scored `GeoJSON` overlay export.
//!
//! Builds a `FeatureCollection` the frontend uses to color planning area
//! polygons: one feature per score record, carrying the area geometry
//! (converted back to `GeoJSON` `[lon, lat]` axis order) and the scores as
//! properties. Areas without boundary data are exported as centroid points
//! so they still render as markers.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::json;
use transit_map_analytics_models::ScoreRecord;
use transit_map_geography_models::{PlanningArea, Ring};

use crate::ExportError;

/// Builds the scored `FeatureCollection`.
///
/// Records without a matching area in `areas` are skipped with a warning;
/// that indicates the caller scored against a different area snapshot.
#[must_use]
pub fn scored_feature_collection(
    areas: &[PlanningArea],
    records: &[ScoreRecord],
) -> serde_json::Value {
    let by_name: BTreeMap<&str, &PlanningArea> =
        areas.iter().map(|area| (area.name.as_str(), area)).collect();

    let features: Vec<serde_json::Value> = records
        .iter()
        .filter_map(|record| {
            let Some(area) = by_name.get(record.area.as_str()) else {
                log::warn!("No area geometry for scored record '{}'", record.area);
                return None;
            };
            Some(feature(area, record))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Writes the scored overlay to a file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or serialized.
pub fn write_overlay_file(
    areas: &[PlanningArea],
    records: &[ScoreRecord],
    path: &Path,
) -> Result<(), ExportError> {
    let collection = scored_feature_collection(areas, records);
    let file = std::fs::File::create(path)?;
    serde_json::to_writer(file, &collection)?;
    log::info!(
        "Wrote scored overlay with {} features to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

fn feature(area: &PlanningArea, record: &ScoreRecord) -> serde_json::Value {
    let geometry = area.boundary.as_ref().map_or_else(
        || {
            json!({
                "type": "Point",
                "coordinates": [area.centroid.lon, area.centroid.lat],
            })
        },
        |boundary| {
            let polygons: Vec<serde_json::Value> = boundary
                .rings
                .iter()
                .map(|ring| json!([closed_positions(ring)]))
                .collect();
            json!({
                "type": "MultiPolygon",
                "coordinates": polygons,
            })
        },
    );

    json!({
        "type": "Feature",
        "properties": {
            "name": record.area,
            "totalScore": record.total_score,
            "band": record.band().label(),
            "busScore": record.bus_score,
            "mrtScore": record.mrt_score,
            "taxiScore": record.taxi_score,
            "carparkScore": record.carpark_score,
            "population": record.population,
        },
        "geometry": geometry,
    })
}

/// Converts a ring back to `GeoJSON` `[lon, lat]` positions, closing it if
/// the first vertex does not repeat at the end (GeoJSON requires closure).
fn closed_positions(ring: &Ring) -> Vec<[f64; 2]> {
    let mut positions: Vec<[f64; 2]> = ring.vertices.iter().map(|v| [v.lon, v.lat]).collect();

    if let (Some(first), Some(last)) = (positions.first().copied(), positions.last())
        && first != *last
    {
        positions.push(first);
    }

    positions
}
