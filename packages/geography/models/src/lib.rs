#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planning area and geographic primitive types.
//!
//! These types represent named planning areas (the unit of aggregation for
//! connectivity scoring) and the raw coordinate data resolved into them.
//! They are independent of any specific upstream feed.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A geographic point in latitude/longitude order.
///
/// Note the axis order: `GeoJSON` stores positions as `[lon, lat]`; every
/// loader swaps to `(lat, lon)` at the parse boundary so that the rest of
/// the toolchain never sees mixed axis orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both coordinates are finite and within the valid
    /// geographic ranges. Upstream feeds occasionally emit malformed
    /// coordinates; invalid points resolve to no area rather than erroring.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// An ordered sequence of vertices forming one polygon ring.
///
/// The first and last vertex may or may not repeat; containment testing
/// closes the ring implicitly. Rings with fewer than 3 vertices are
/// degenerate and never match any point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    /// Ring vertices in `(lat, lon)` order.
    pub vertices: Vec<GeoPoint>,
}

impl Ring {
    /// Creates a ring from a vertex list.
    #[must_use]
    pub const fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    /// Returns `true` if this ring has too few vertices to enclose area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// The outer rings of a planning area boundary.
///
/// A `GeoJSON` `Polygon` contributes one ring; a `MultiPolygon` contributes
/// one per constituent polygon. Interior (hole) rings are not modeled; a
/// point inside any outer ring is inside the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    /// One outer ring per constituent polygon.
    pub rings: Vec<Ring>,
}

impl Boundary {
    /// Creates a boundary from outer rings.
    #[must_use]
    pub const fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }
}

/// A named planning area.
///
/// The centroid is always present and drives nearest-area fallback when no
/// boundary polygon contains a point. Areas with zero population remain
/// valid containment targets but are excluded from connectivity scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningArea {
    /// Unique area name (e.g. "Bishan").
    pub name: String,
    /// Area centroid.
    pub centroid: GeoPoint,
    /// Resident population; 0 for uninhabited areas.
    pub population: u64,
    /// Boundary polygons, when boundary data exists for this area.
    pub boundary: Option<Boundary>,
}

/// Transportation facility categories tallied per planning area.
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
pub enum FacilityCategory {
    /// Public bus stops.
    BusStops,
    /// MRT and LRT stations.
    MrtStations,
    /// Available taxi positions.
    Taxis,
    /// Public carparks.
    Carparks,
}

impl FacilityCategory {
    /// All categories, in scoring order.
    pub const ALL: &[Self] = &[
        Self::BusStops,
        Self::MrtStations,
        Self::Taxis,
        Self::Carparks,
    ];

    /// Human-readable label for summaries and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BusStops => "bus stops",
            Self::MrtStations => "MRT stations",
            Self::Taxis => "taxis",
            Self::Carparks => "carparks",
        }
    }
}

/// Field mapping for extracting planning area properties from a boundary
/// `GeoJSON` file, regardless of the publisher-specific property naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryFieldMapping {
    /// Property field containing the area name.
    pub name: String,
    /// Property field containing the resident population, if the file
    /// carries one. Absent populations fall back to the embedded registry.
    pub population: Option<String>,
}

impl Default for BoundaryFieldMapping {
    fn default() -> Self {
        Self {
            name: "PLN_AREA_N".to_string(),
            population: None,
        }
    }
}
