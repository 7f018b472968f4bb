//! Scoring configuration loading and validation.
//!
//! Weights and divisors ship with tuned defaults; a TOML file can override
//! either table without restating the other.

use transit_map_analytics_models::ScoringConfig;
use transit_map_geography_models::FacilityCategory;

use crate::AnalyticsError;

/// How far the weight sum may drift from 1.0 before the config is rejected.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Parses and validates a scoring configuration from TOML.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the TOML fails to parse, the weights do
/// not sum to 1, or any weight or divisor is not a positive finite number.
pub fn from_toml_str(toml_str: &str) -> Result<ScoringConfig, AnalyticsError> {
    let config: ScoringConfig = toml::de::from_str(toml_str)?;
    validate(&config)?;
    Ok(config)
}

/// Validates weights and divisors.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidConfig`] describing the first violation.
pub fn validate(config: &ScoringConfig) -> Result<(), AnalyticsError> {
    for category in FacilityCategory::ALL {
        let weight = config.weights.get(*category);
        if !weight.is_finite() || weight < 0.0 {
            return Err(AnalyticsError::InvalidConfig {
                message: format!("weight for {} must be a non-negative number, got {weight}", category.label()),
            });
        }

        let divisor = config.divisors.get(*category);
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(AnalyticsError::InvalidConfig {
                message: format!("divisor for {} must be a positive number, got {divisor}", category.label()),
            });
        }
    }

    let sum = config.weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(AnalyticsError::InvalidConfig {
            message: format!("weights must sum to 1.0, got {sum}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = from_toml_str("").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = from_toml_str(
            "[weights]\nbusStops = 0.40\nmrtStations = 0.25\ntaxis = 0.15\ncarparks = 0.20\n",
        )
        .unwrap();
        assert!((config.weights.bus_stops - 0.40).abs() < 1e-9);
        assert!((config.divisors.bus_stops - 40.0).abs() < 1e-9, "divisors untouched");
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = from_toml_str("[weights]\nbusStops = 0.9\n").unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "got: {err}");
    }

    #[test]
    fn rejects_non_positive_divisor() {
        let err = from_toml_str("[divisors]\ntaxis = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("positive"), "got: {err}");
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(from_toml_str("not = = toml").is_err());
    }

    #[test]
    fn default_config_validates() {
        assert!(validate(&ScoringConfig::default()).is_ok());
    }
}
