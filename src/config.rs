//! Swarm configuration
//!
//! Loaded once at startup from JSON. Every section has production defaults,
//! so a partial document (or `{}`) is valid. Invalid values are rejected
//! outright rather than clamped.

use serde::{Deserialize, Serialize};

use crate::breath::{BreathCycleConfig, BreathPattern};
use crate::error::ConfigError;
use crate::orbit::{OrbitConfig, SmoothingConfig, SpacingConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Breath cycle durations and easing strategy
    pub breath: BreathCycleConfig,
    pub orbit: OrbitConfig,
    pub spacing: SpacingConfig,
    pub smoothing: SmoothingConfig,
    /// Renumber slots after evictions so the spiral stays dense
    pub compact_slots: bool,
}

impl SwarmConfig {
    /// Defaults with a named breathing pattern
    pub fn from_pattern(pattern: BreathPattern) -> Self {
        Self {
            breath: pattern.config(),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded swarm config: {:.1}s breath cycle, orbit {}..{}",
            config.breath.total_cycle_seconds(),
            config.orbit.min_radius,
            config.orbit.max_radius
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section. The breath section is validated on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orbit.validate()?;
        self.spacing.validate()?;
        self.smoothing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{BreathCurve, PhaseType};

    #[test]
    fn test_empty_document_is_default() {
        let config = SwarmConfig::from_json("{}").unwrap();
        assert_eq!(config, SwarmConfig::default());
        assert!(!config.compact_slots);
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "breath": {"inhale": 4, "hold_in": 7, "exhale": 8, "hold_out": 0,
                       "curve": {"kind": "rounded_wave", "delta": 0.3}},
            "orbit": {"min_radius": 1.0, "max_radius": 9.0},
            "smoothing": {"fade_in": true},
            "compact_slots": true
        }"#;
        let config = SwarmConfig::from_json(json).unwrap();
        assert_eq!(config.breath.total_cycle_seconds(), 19.0);
        assert_eq!(config.breath.duration(PhaseType::HoldIn), 7.0);
        assert_eq!(config.breath.curve(), BreathCurve::RoundedWave { delta: 0.3 });
        assert_eq!(config.orbit.max_radius, 9.0);
        assert_eq!(config.orbit.base_speed, OrbitConfig::default().base_speed);
        assert!(config.smoothing.fade_in);
        assert!(config.compact_slots);
    }

    #[test]
    fn test_invalid_sections_fail_fast() {
        let err = SwarmConfig::from_json(r#"{"orbit": {"min_radius": 8.0, "max_radius": 2.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRadiusBounds { .. }));

        let err = SwarmConfig::from_json(r#"{"breath": {"inhale": 0, "exhale": 4}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Inhale"));

        let err = SwarmConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip_json() {
        let config = SwarmConfig::from_pattern(BreathPattern::Coherent);
        let json = config.to_json_pretty().unwrap();
        let back = SwarmConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }
}
