//! Breath cycle configuration
//!
//! A cycle is four ordered sub-phases. Construction validates the durations,
//! so any `BreathCycleConfig` in hand is safe to evaluate every frame.

use serde::{Deserialize, Serialize};

use super::curve::BreathCurve;
use crate::error::ConfigError;

/// The four ordered sub-phases of one breath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl PhaseType {
    /// Cycle order
    pub const ALL: [PhaseType; 4] = [
        PhaseType::Inhale,
        PhaseType::HoldIn,
        PhaseType::Exhale,
        PhaseType::HoldOut,
    ];

    /// Position within the cycle (0..4)
    pub fn index(self) -> usize {
        match self {
            PhaseType::Inhale => 0,
            PhaseType::HoldIn => 1,
            PhaseType::Exhale => 2,
            PhaseType::HoldOut => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn is_hold(self) -> bool {
        matches!(self, PhaseType::HoldIn | PhaseType::HoldOut)
    }

    /// Text shown by UI collaborators
    pub fn label(self) -> &'static str {
        match self {
            PhaseType::Inhale => "Breathe in",
            PhaseType::HoldIn => "Hold",
            PhaseType::Exhale => "Breathe out",
            PhaseType::HoldOut => "Rest",
        }
    }
}

/// Wire shape of [`BreathCycleConfig`] (unvalidated)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BreathCycleSeconds {
    pub inhale: f64,
    #[serde(default)]
    pub hold_in: f64,
    pub exhale: f64,
    #[serde(default)]
    pub hold_out: f64,
    #[serde(default)]
    pub curve: BreathCurve,
}

/// Validated breath cycle: sub-phase durations in seconds plus the easing strategy.
///
/// Inhale and exhale must be strictly positive. Holds may be zero, which
/// removes that sub-phase from the cycle entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BreathCycleSeconds", into = "BreathCycleSeconds")]
pub struct BreathCycleConfig {
    durations: [f64; 4],
    total: f64,
    curve: BreathCurve,
}

impl BreathCycleConfig {
    pub fn new(inhale: f64, hold_in: f64, exhale: f64, hold_out: f64) -> Result<Self, ConfigError> {
        Self::with_curve(inhale, hold_in, exhale, hold_out, BreathCurve::Phased)
    }

    pub fn with_curve(
        inhale: f64,
        hold_in: f64,
        exhale: f64,
        hold_out: f64,
        curve: BreathCurve,
    ) -> Result<Self, ConfigError> {
        let durations = [inhale, hold_in, exhale, hold_out];
        for (phase, &seconds) in PhaseType::ALL.iter().zip(durations.iter()) {
            let valid = if phase.is_hold() {
                seconds.is_finite() && seconds >= 0.0
            } else {
                seconds.is_finite() && seconds > 0.0
            };
            if !valid {
                return Err(ConfigError::InvalidPhaseDuration {
                    phase: *phase,
                    seconds,
                });
            }
        }
        curve.validate()?;

        // Summed in cycle order; the phase walk accumulates offsets the same way
        let total = durations.iter().fold(0.0, |acc, d| acc + d);
        if !(total > 0.0 && total.is_finite()) {
            return Err(ConfigError::EmptyCycle);
        }

        Ok(Self {
            durations,
            total,
            curve,
        })
    }

    #[inline]
    pub fn duration(&self, phase: PhaseType) -> f64 {
        self.durations[phase.index()]
    }

    /// Durations in cycle order
    #[inline]
    pub fn durations(&self) -> &[f64; 4] {
        &self.durations
    }

    #[inline]
    pub fn total_cycle_seconds(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn curve(&self) -> BreathCurve {
        self.curve
    }

    /// Start offset of `phase` within the cycle
    pub fn phase_start(&self, phase: PhaseType) -> f64 {
        self.durations[..phase.index()]
            .iter()
            .fold(0.0, |acc, d| acc + d)
    }
}

impl Default for BreathCycleConfig {
    fn default() -> Self {
        BreathPattern::default().config()
    }
}

impl TryFrom<BreathCycleSeconds> for BreathCycleConfig {
    type Error = ConfigError;

    fn try_from(raw: BreathCycleSeconds) -> Result<Self, Self::Error> {
        Self::with_curve(raw.inhale, raw.hold_in, raw.exhale, raw.hold_out, raw.curve)
    }
}

impl From<BreathCycleConfig> for BreathCycleSeconds {
    fn from(config: BreathCycleConfig) -> Self {
        let [inhale, hold_in, exhale, hold_out] = config.durations;
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
            curve: config.curve,
        }
    }
}

/// Named breathing patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BreathPattern {
    /// 4-4-4-4 square breathing
    #[default]
    Box,
    /// 4-7-8 relaxing breath, no rest
    Relaxing,
    /// ~5.5 breaths per minute, no holds
    Coherent,
}

impl BreathPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreathPattern::Box => "Box",
            BreathPattern::Relaxing => "Relaxing",
            BreathPattern::Coherent => "Coherent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "box" | "square" => Some(BreathPattern::Box),
            "relaxing" | "4-7-8" | "478" => Some(BreathPattern::Relaxing),
            "coherent" | "resonant" => Some(BreathPattern::Coherent),
            _ => None,
        }
    }

    /// Sub-phase durations in cycle order
    pub fn durations(&self) -> [f64; 4] {
        match self {
            BreathPattern::Box => [4.0, 4.0, 4.0, 4.0],
            BreathPattern::Relaxing => [4.0, 7.0, 8.0, 0.0],
            BreathPattern::Coherent => [5.5, 0.0, 5.5, 0.0],
        }
    }

    pub fn config(&self) -> BreathCycleConfig {
        let [inhale, hold_in, exhale, hold_out] = self.durations();
        let total = inhale + hold_in + exhale + hold_out;
        // Preset durations are known-valid
        BreathCycleConfig {
            durations: [inhale, hold_in, exhale, hold_out],
            total,
            curve: BreathCurve::Phased,
        }
    }
}
