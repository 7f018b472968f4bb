#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Connectivity scoring and per-area facility aggregation.
//!
//! Aggregation resolves raw facility points into per-area tallies; scoring
//! converts those tallies plus population into a 0-100 weighted composite
//! connectivity index per populated area.

pub mod aggregate;
pub mod config;
pub mod scorer;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// TOML configuration parsing failed.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A scoring configuration failed validation.
    #[error("Invalid scoring config: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },
}
