//! Density-to-score formulas and the weighted composite index.
//!
//! Every category shares one formula shape: residents-per-facility divided
//! by a tuned divisor, subtracted from 100 and clamped to [0, 100]. An area
//! with no facilities of a category scores 0 for that component.

use transit_map_analytics_models::{FacilityCounts, ScoreRecord, ScoringConfig};
use transit_map_geography_models::PlanningArea;

/// One scored category.
struct Component {
    score: u8,
    residents_per_facility: Option<u64>,
}

/// Scores a single category.
///
/// `residents_per_facility` is rounded to the nearest integer before the
/// divisor is applied, so the reported metric and the score agree.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn component(population: u64, count: u64, divisor: f64) -> Component {
    if count == 0 {
        return Component {
            score: 0,
            residents_per_facility: None,
        };
    }

    let residents_per_facility = (population as f64 / count as f64).round();
    let raw = 100.0 - residents_per_facility / divisor;
    let score = raw.clamp(0.0, 100.0).round() as u8;

    Component {
        score,
        residents_per_facility: Some(residents_per_facility as u64),
    }
}

/// Weighted composite of the integer component scores, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn composite(scores: [(u8, f64); 4]) -> u8 {
    scores
        .iter()
        .map(|(score, weight)| f64::from(*score) * weight)
        .sum::<f64>()
        .round() as u8
}

/// Computes the connectivity score record for one populated area.
///
/// # Panics
///
/// Panics if `area.population` is 0. Callers filter unpopulated areas
/// before scoring; a zero population reaching this point is a precondition
/// violation, not a recoverable input.
#[must_use]
pub fn score(area: &PlanningArea, counts: FacilityCounts, config: &ScoringConfig) -> ScoreRecord {
    assert!(
        area.population > 0,
        "connectivity scoring requires a populated area, got population 0 for '{}'",
        area.name
    );

    let divisors = &config.divisors;
    let bus = component(area.population, counts.bus_stops, divisors.bus_stops);
    let mrt = component(area.population, counts.mrt_stations, divisors.mrt_stations);
    let taxi = component(area.population, counts.taxis, divisors.taxis);
    let carpark = component(area.population, counts.carparks, divisors.carparks);

    let weights = &config.weights;
    let total_score = composite([
        (bus.score, weights.bus_stops),
        (mrt.score, weights.mrt_stations),
        (taxi.score, weights.taxis),
        (carpark.score, weights.carparks),
    ]);

    ScoreRecord {
        area: area.name.clone(),
        total_score,
        bus_score: bus.score,
        mrt_score: mrt.score,
        taxi_score: taxi.score,
        carpark_score: carpark.score,
        population: area.population,
        bus_stops: counts.bus_stops,
        mrt_stations: counts.mrt_stations,
        taxis: counts.taxis,
        carparks: counts.carparks,
        residents_per_bus_stop: bus.residents_per_facility,
        residents_per_mrt_station: mrt.residents_per_facility,
        residents_per_taxi: taxi.residents_per_facility,
        residents_per_carpark: carpark.residents_per_facility,
    }
}

/// Scores every populated area in the slice, skipping areas with zero
/// population, and returns records in area order.
#[must_use]
pub fn score_all(
    areas: &[PlanningArea],
    counts_by_area: &std::collections::BTreeMap<String, FacilityCounts>,
    config: &ScoringConfig,
) -> Vec<ScoreRecord> {
    let mut records = Vec::new();

    for area in areas {
        if area.population == 0 {
            log::debug!("Skipping unpopulated area '{}'", area.name);
            continue;
        }
        let counts = counts_by_area.get(&area.name).copied().unwrap_or_default();
        records.push(score(area, counts, config));
    }

    log::info!("Scored {} populated areas", records.len());
    records
}
