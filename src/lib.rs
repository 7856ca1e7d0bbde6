//! Breath Swarm - a shared breathing clock driving an orbiting swarm
//!
//! Core modules:
//! - `easing`: Pure easing curves
//! - `breath`: Deterministic breath clock (wall-clock time → phase)
//! - `orbit`: Spacing, orbital motion targets, and frame smoothing
//! - `swarm`: Owning context that reconciles participants and runs frames
//! - `config`: Serde-loaded, validated configuration
//! - `platform`: Host clock and browser bindings

pub mod breath;
pub mod config;
pub mod easing;
pub mod error;
pub mod orbit;
pub mod platform;
pub mod swarm;

pub use breath::{BreathClock, BreathCycleConfig, BreathState, PhaseType, compute_breath_state};
pub use config::SwarmConfig;
pub use error::ConfigError;
pub use swarm::{Frame, Participant, ParticleFrame, Swarm, SwarmEvent};

use glam::Vec2;

/// Tuning defaults (scene units, seconds, radians)
pub mod consts {
    /// Closest approach, reached at full inhale
    pub const MIN_ORBIT_RADIUS: f32 = 2.5;
    /// Farthest orbit, reached at full exhale
    pub const MAX_ORBIT_RADIUS: f32 = 6.0;
    /// Angular speed at max radius with an empty breath (rad/s)
    pub const BASE_ANGULAR_SPEED: f32 = 0.12;
    /// Fractional growth of the apparent central mass at full inhale
    pub const INHALE_MASS_GAIN: f32 = 0.6;
    pub const MIN_VELOCITY_FACTOR: f32 = 0.5;
    pub const MAX_VELOCITY_FACTOR: f32 = 2.5;
    /// Per-particle speed variation (fraction of the clamped factor)
    pub const SPEED_JITTER: f32 = 0.15;
    /// Fraction of the radius band given over to per-particle shells
    pub const SHELL_SPREAD: f32 = 0.35;

    /// Ambient wobble amplitudes (scene units) and base frequency (Hz)
    pub const WOBBLE_RADIAL: f32 = 0.12;
    pub const WOBBLE_PERPENDICULAR: f32 = 0.08;
    pub const WOBBLE_FREQUENCY: f32 = 0.07;

    /// Extra size at full inhale
    pub const BREATH_SCALE_PULSE: f32 = 0.25;
    /// Size multiplier for the local participant's own marker
    pub const LOCAL_USER_SCALE: f32 = 1.4;

    /// Size = BASE_SIZE / sqrt(count), clamped to [MIN_SIZE, MAX_SIZE]
    pub const BASE_SIZE: f32 = 1.2;
    pub const MIN_SIZE: f32 = 0.08;
    pub const MAX_SIZE: f32 = 0.45;

    /// Exponential smoothing rates (1/s)
    pub const RADIUS_RATE: f32 = 4.0;
    pub const REFLOW_RATE: f32 = 1.5;
    pub const FADE_RATE: f32 = 2.0;
}

/// Golden angle π(3 − √5) in radians (~137.5°)
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Wrap an angle into [0, τ)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to τ for tiny negative inputs
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `from` to `to`, in [-π, π)
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_golden_angle_constant() {
        let expected = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-15);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn test_shortest_angle_delta() {
        assert!((shortest_angle_delta(0.1, 0.3) - 0.2).abs() < 1e-6);
        // Across the seam goes the short way
        assert!((shortest_angle_delta(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        assert!((shortest_angle_delta(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        assert!(shortest_angle_delta(0.0, PI).abs() <= PI);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
