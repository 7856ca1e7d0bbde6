//! Configuration errors
//!
//! Everything here is raised once, while loading configuration. The per-frame
//! path never returns an error.

use thiserror::Error;

use crate::breath::PhaseType;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A sub-phase duration is negative, NaN, infinite, or zero where zero is not allowed
    #[error("breath phase {phase:?} has invalid duration {seconds}s")]
    InvalidPhaseDuration { phase: PhaseType, seconds: f64 },

    #[error("breath cycle has zero total duration")]
    EmptyCycle,

    #[error("orbit radius bounds invalid: min {min} must be positive and below max {max}")]
    InvalidRadiusBounds { min: f32, max: f32 },

    #[error("velocity factor bounds invalid: min {min} must be positive and below max {max}")]
    InvalidVelocityBounds { min: f32, max: f32 },

    #[error("size bounds invalid: min {min} must be positive and not above max {max}")]
    InvalidSizeBounds { min: f32, max: f32 },

    /// Smoothing/fade rates must be finite and non-negative
    #[error("rate `{name}` must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("rounded-wave delta must be finite and positive, got {0}")]
    InvalidCurveDelta(f64),

    #[error("parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject NaN, infinities, and negatives for a named rate
pub(crate) fn check_rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

/// Require `lo <= value <= hi` (finite)
pub(crate) fn check_range(
    name: &'static str,
    value: f32,
    lo: f32,
    hi: f32,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= lo && value <= hi {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rate() {
        assert!(check_rate("radius", 0.0).is_ok());
        assert!(check_rate("radius", 4.0).is_ok());
        assert!(matches!(
            check_rate("radius", -1.0),
            Err(ConfigError::InvalidRate { name: "radius", .. })
        ));
        assert!(check_rate("radius", f32::NAN).is_err());
        assert!(check_rate("radius", f32::INFINITY).is_err());
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = ConfigError::InvalidRadiusBounds { min: 5.0, max: 2.0 };
        assert!(err.to_string().contains("min 5"));
        let err = check_range("shell_spread", 1.5, 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("shell_spread"));
    }
}
