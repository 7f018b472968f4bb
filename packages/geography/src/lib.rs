#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry primitives, boundary loading, and the planning area registry.
//!
//! Loads planning area boundaries from `GeoJSON` (performing the mandatory
//! `[lon, lat]` to `(lat, lon)` axis swap at the parse boundary), provides
//! the distance and containment primitives used for area resolution, and
//! embeds a registry of planning areas with centroid and population data.

pub mod boundaries;
pub mod geometry;
pub mod points;
pub mod registry;

use thiserror::Error;

/// Errors that can occur while loading geographic data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
