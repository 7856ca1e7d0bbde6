//! Easing strategies for breath progress
//!
//! The clock hands each sub-phase's linear progress to the configured curve.
//! Holds always use the settle curve; the strategy only decides how the
//! breaths themselves accelerate.

use serde::{Deserialize, Serialize};

use super::config::PhaseType;
use crate::easing::{ease_in_out_sine, hold_settle, rounded_wave};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreathCurve {
    /// Half-cosine ease in/out on every breath
    #[default]
    Phased,
    /// Rounded square wave; smaller `delta` means flatter ends and a faster middle
    RoundedWave { delta: f64 },
}

impl BreathCurve {
    pub fn ease(&self, phase: PhaseType, raw_progress: f64) -> f64 {
        if phase.is_hold() {
            return hold_settle(raw_progress);
        }
        match *self {
            BreathCurve::Phased => ease_in_out_sine(raw_progress),
            BreathCurve::RoundedWave { delta } => rounded_wave(raw_progress, delta),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            BreathCurve::Phased => Ok(()),
            BreathCurve::RoundedWave { delta } if delta.is_finite() && delta > 0.0 => Ok(()),
            BreathCurve::RoundedWave { delta } => Err(ConfigError::InvalidCurveDelta(delta)),
        }
    }
}
