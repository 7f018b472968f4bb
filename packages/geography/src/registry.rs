//! Compile-time registry of Singapore planning areas.
//!
//! Embedded via `include_str!` so the toolchain can resolve points and
//! score areas without any external boundary file supplying populations.
//! Boundary polygons are not embedded; registry areas carry centroids only
//! and rely on nearest-centroid fallback for containment.

use serde::Deserialize;
use transit_map_geography_models::{GeoPoint, PlanningArea};

/// Number of planning areas in the embedded registry. Updated when the
/// dataset changes. Enforced by a test.
#[cfg(test)]
const EXPECTED_AREA_COUNT: usize = 55;

const AREAS_TOML: &str = include_str!("../areas/singapore.toml");

#[derive(Debug, Deserialize)]
struct AreaFile {
    areas: Vec<AreaEntry>,
}

#[derive(Debug, Deserialize)]
struct AreaEntry {
    name: String,
    lat: f64,
    lon: f64,
    population: u64,
}

/// Returns all planning areas in the embedded registry, without boundaries.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. Since it is a compile-time
/// constant, a parse failure indicates a development error and is caught
/// during CI.
#[must_use]
pub fn all_areas() -> Vec<PlanningArea> {
    let file: AreaFile = toml::de::from_str(AREAS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded planning area registry: {e}"));

    file.areas
        .into_iter()
        .map(|entry| PlanningArea {
            name: entry.name,
            centroid: GeoPoint::new(entry.lat, entry.lon),
            population: entry.population,
            boundary: None,
        })
        .collect()
}

/// Fills in populations for areas whose boundary file carried none.
///
/// Matches by case-insensitive name; areas that already have a non-zero
/// population keep it.
pub fn merge_populations(areas: &mut [PlanningArea]) {
    let registry = all_areas();
    let mut filled = 0_usize;

    for area in areas.iter_mut().filter(|a| a.population == 0) {
        if let Some(entry) = registry
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(&area.name))
            && entry.population > 0
        {
            area.population = entry.population;
            filled += 1;
        }
    }

    if filled > 0 {
        log::info!("Filled {filled} area populations from the embedded registry");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use transit_map_geography_models::{Boundary, Ring};

    #[test]
    fn loads_all_areas() {
        let areas = all_areas();
        assert_eq!(
            areas.len(),
            EXPECTED_AREA_COUNT,
            "Expected {EXPECTED_AREA_COUNT} planning areas, found {}. \
             Update EXPECTED_AREA_COUNT after adding/removing areas.",
            areas.len()
        );
    }

    #[test]
    fn area_names_are_unique() {
        let areas = all_areas();
        let mut seen = BTreeSet::new();
        for area in &areas {
            assert!(seen.insert(&area.name), "Duplicate area name: {}", area.name);
        }
    }

    #[test]
    fn centroids_are_within_singapore() {
        for area in &all_areas() {
            assert!(
                (1.1..=1.5).contains(&area.centroid.lat)
                    && (103.5..=104.1).contains(&area.centroid.lon),
                "Centroid of {} outside Singapore: {:?}",
                area.name,
                area.centroid
            );
        }
    }

    #[test]
    fn most_areas_are_populated() {
        let areas = all_areas();
        let populated = areas.iter().filter(|a| a.population > 0).count();
        assert!(
            populated > areas.len() / 2,
            "Only {populated} of {} areas populated",
            areas.len()
        );
    }

    #[test]
    fn merge_fills_only_missing_populations() {
        let ring = Ring::new(vec![
            GeoPoint::new(1.34, 103.83),
            GeoPoint::new(1.34, 103.87),
            GeoPoint::new(1.36, 103.87),
            GeoPoint::new(1.36, 103.83),
        ]);
        let mut areas = vec![
            PlanningArea {
                name: "BISHAN".to_string(),
                centroid: GeoPoint::new(1.3508, 103.8485),
                population: 0,
                boundary: Some(Boundary::new(vec![ring])),
            },
            PlanningArea {
                name: "Yishun".to_string(),
                centroid: GeoPoint::new(1.4304, 103.8354),
                population: 123,
                boundary: None,
            },
        ];

        merge_populations(&mut areas);

        assert_eq!(areas[0].population, 88_000, "case-insensitive fill");
        assert_eq!(areas[1].population, 123, "existing population kept");
    }

    #[test]
    fn merge_leaves_unknown_areas_alone() {
        let mut areas = vec![PlanningArea {
            name: "Atlantis".to_string(),
            centroid: GeoPoint::new(1.3, 103.8),
            population: 0,
            boundary: None,
        }];
        merge_populations(&mut areas);
        assert_eq!(areas[0].population, 0);
    }
}
