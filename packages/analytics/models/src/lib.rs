#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Facility count, scoring configuration, and score record types.
//!
//! The scoring weights and density divisors live here as configuration
//! types with the tuned defaults, so they can be adjusted (e.g. from a
//! TOML file) without touching the scoring formulas.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use transit_map_geography_models::FacilityCategory;

/// Per-area facility tallies, built by resolving facility points to areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityCounts {
    /// Bus stops in the area.
    pub bus_stops: u64,
    /// MRT and LRT stations in the area.
    pub mrt_stations: u64,
    /// Taxis currently positioned in the area.
    pub taxis: u64,
    /// Carparks in the area.
    pub carparks: u64,
}

impl FacilityCounts {
    /// Returns the tally for one category.
    #[must_use]
    pub const fn get(&self, category: FacilityCategory) -> u64 {
        match category {
            FacilityCategory::BusStops => self.bus_stops,
            FacilityCategory::MrtStations => self.mrt_stations,
            FacilityCategory::Taxis => self.taxis,
            FacilityCategory::Carparks => self.carparks,
        }
    }

    /// Increments the tally for one category.
    pub fn increment(&mut self, category: FacilityCategory) {
        match category {
            FacilityCategory::BusStops => self.bus_stops += 1,
            FacilityCategory::MrtStations => self.mrt_stations += 1,
            FacilityCategory::Taxis => self.taxis += 1,
            FacilityCategory::Carparks => self.carparks += 1,
        }
    }
}

/// Weights applied to the component scores when computing the composite
/// connectivity index. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    /// Weight of the bus stop component.
    pub bus_stops: f64,
    /// Weight of the MRT station component.
    pub mrt_stations: f64,
    /// Weight of the taxi component.
    pub taxis: f64,
    /// Weight of the carpark component.
    pub carparks: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            bus_stops: 0.30,
            mrt_stations: 0.35,
            taxis: 0.15,
            carparks: 0.20,
        }
    }
}

impl ScoreWeights {
    /// Returns the weight for one category.
    #[must_use]
    pub const fn get(&self, category: FacilityCategory) -> f64 {
        match category {
            FacilityCategory::BusStops => self.bus_stops,
            FacilityCategory::MrtStations => self.mrt_stations,
            FacilityCategory::Taxis => self.taxis,
            FacilityCategory::Carparks => self.carparks,
        }
    }

    /// Sum of all weights; 1.0 for a valid configuration.
    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.bus_stops + self.mrt_stations + self.taxis + self.carparks
    }
}

/// Residents-per-facility divisors for the density-to-score formula.
///
/// Each divisor is tuned so that the component score reaches 0 at a chosen
/// residents-per-facility threshold: 100 times the divisor (e.g. bus stops
/// at 40 hit 0 at 4000 residents per stop).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreDivisors {
    /// Bus stop divisor (score 0 at 4000 residents/stop).
    pub bus_stops: f64,
    /// MRT station divisor (score 0 at 40000 residents/station).
    pub mrt_stations: f64,
    /// Taxi divisor (score 0 at 15000 residents/taxi).
    pub taxis: f64,
    /// Carpark divisor (score 0 at 8000 residents/carpark).
    pub carparks: f64,
}

impl Default for ScoreDivisors {
    fn default() -> Self {
        Self {
            bus_stops: 40.0,
            mrt_stations: 400.0,
            taxis: 150.0,
            carparks: 80.0,
        }
    }
}

impl ScoreDivisors {
    /// Returns the divisor for one category.
    #[must_use]
    pub const fn get(&self, category: FacilityCategory) -> f64 {
        match category {
            FacilityCategory::BusStops => self.bus_stops,
            FacilityCategory::MrtStations => self.mrt_stations,
            FacilityCategory::Taxis => self.taxis,
            FacilityCategory::Carparks => self.carparks,
        }
    }
}

/// Complete scoring configuration: weights plus divisors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Composite weights.
    pub weights: ScoreWeights,
    /// Density divisors.
    pub divisors: ScoreDivisors,
}

/// Connectivity score for one planning area, produced fresh per scoring
/// pass and immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Planning area name.
    pub area: String,
    /// Weighted composite connectivity index, 0-100.
    pub total_score: u8,
    /// Bus stop component score, 0-100.
    pub bus_score: u8,
    /// MRT station component score, 0-100.
    pub mrt_score: u8,
    /// Taxi component score, 0-100.
    pub taxi_score: u8,
    /// Carpark component score, 0-100.
    pub carpark_score: u8,
    /// Resident population used for the densities.
    pub population: u64,
    /// Raw bus stop count.
    pub bus_stops: u64,
    /// Raw MRT station count.
    pub mrt_stations: u64,
    /// Raw taxi count.
    pub taxis: u64,
    /// Raw carpark count.
    pub carparks: u64,
    /// Residents per bus stop; `None` when the area has no bus stops.
    pub residents_per_bus_stop: Option<u64>,
    /// Residents per MRT station; `None` when the area has no stations.
    pub residents_per_mrt_station: Option<u64>,
    /// Residents per taxi; `None` when the area has no taxis.
    pub residents_per_taxi: Option<u64>,
    /// Residents per carpark; `None` when the area has no carparks.
    pub residents_per_carpark: Option<u64>,
}

impl ScoreRecord {
    /// Qualitative band for this record's composite score.
    #[must_use]
    pub const fn band(&self) -> ConnectivityBand {
        ConnectivityBand::from_composite(self.total_score)
    }
}

/// Qualitative banding of the composite score, for display.
///
/// Band boundaries are inclusive on the lower bound.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityBand {
    /// Composite 85 and above.
    Excellent,
    /// Composite 70-84.
    VeryGood,
    /// Composite 55-69.
    Good,
    /// Composite 40-54.
    Fair,
    /// Composite 25-39.
    Poor,
    /// Composite 10-24.
    VeryPoor,
    /// Composite below 10.
    ExtremelyPoor,
}

impl ConnectivityBand {
    /// Maps a composite score to its band.
    #[must_use]
    pub const fn from_composite(score: u8) -> Self {
        match score {
            85.. => Self::Excellent,
            70.. => Self::VeryGood,
            55.. => Self::Good,
            40.. => Self::Fair,
            25.. => Self::Poor,
            10.. => Self::VeryPoor,
            _ => Self::ExtremelyPoor,
        }
    }

    /// Human-readable band label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
            Self::ExtremelyPoor => "extremely poor",
        }
    }
}
