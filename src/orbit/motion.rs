//! Breath-driven orbital motion
//!
//! Turns the shared breath into per-particle targets:
//! - radius: inhale draws the swarm in, exhale lets it out
//! - angular speed: a softened Kepler law, `v ∝ sqrt(GM_eff / r)`, where the
//!   apparent central mass grows with the breath so particles visibly speed up
//!   as they approach the center
//! - ambient drift: two slow sinusoids keyed by the particle's own seeds
//!
//! Oscillations are evaluated from wall-clock time, never from accumulated
//! frame deltas. Only the orbit angle is integrated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::breath::BreathState;
use crate::consts::*;
use crate::easing::lerp;
use crate::error::{ConfigError, check_range, check_rate};
use crate::swarm::{MotionSeeds, ParticleIdentity};
use crate::wrap_angle;

/// Ratio between the radial and perpendicular wobble frequencies (golden ratio)
const WOBBLE_RATIO: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Closest approach, at full inhale
    pub min_radius: f32,
    /// Farthest orbit, at full exhale
    pub max_radius: f32,
    /// Angular speed (rad/s) at max radius with an empty breath
    pub base_speed: f32,
    /// Fractional growth of apparent mass at full inhale
    pub inhale_mass_gain: f32,
    pub min_velocity_factor: f32,
    pub max_velocity_factor: f32,
    /// Per-particle speed spread, fraction of the Kepler factor
    pub speed_jitter: f32,
    /// Share of the radius band used for per-particle shells, in [0, 1]
    pub shell_spread: f32,
    pub wobble_radial: f32,
    pub wobble_perpendicular: f32,
    /// Base wobble frequency (Hz)
    pub wobble_frequency: f32,
    /// Extra size at full inhale (fraction)
    pub breath_scale_pulse: f32,
    pub local_user_scale: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_radius: MIN_ORBIT_RADIUS,
            max_radius: MAX_ORBIT_RADIUS,
            base_speed: BASE_ANGULAR_SPEED,
            inhale_mass_gain: INHALE_MASS_GAIN,
            min_velocity_factor: MIN_VELOCITY_FACTOR,
            max_velocity_factor: MAX_VELOCITY_FACTOR,
            speed_jitter: SPEED_JITTER,
            shell_spread: SHELL_SPREAD,
            wobble_radial: WOBBLE_RADIAL,
            wobble_perpendicular: WOBBLE_PERPENDICULAR,
            wobble_frequency: WOBBLE_FREQUENCY,
            breath_scale_pulse: BREATH_SCALE_PULSE,
            local_user_scale: LOCAL_USER_SCALE,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radii_ok = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius < self.max_radius;
        if !radii_ok {
            return Err(ConfigError::InvalidRadiusBounds {
                min: self.min_radius,
                max: self.max_radius,
            });
        }

        let velocity_ok = self.min_velocity_factor.is_finite()
            && self.max_velocity_factor.is_finite()
            && self.min_velocity_factor > 0.0
            && self.min_velocity_factor < self.max_velocity_factor;
        if !velocity_ok {
            return Err(ConfigError::InvalidVelocityBounds {
                min: self.min_velocity_factor,
                max: self.max_velocity_factor,
            });
        }

        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "base_speed",
                value: self.base_speed,
            });
        }
        check_range("inhale_mass_gain", self.inhale_mass_gain, 0.0, 10.0)?;
        check_range("speed_jitter", self.speed_jitter, 0.0, 0.95)?;
        check_range("shell_spread", self.shell_spread, 0.0, 1.0)?;
        check_rate("wobble_radial", self.wobble_radial)?;
        check_rate("wobble_perpendicular", self.wobble_perpendicular)?;
        check_rate("wobble_frequency", self.wobble_frequency)?;
        check_rate("breath_scale_pulse", self.breath_scale_pulse)?;
        if !(self.local_user_scale.is_finite() && self.local_user_scale > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "local_user_scale",
                value: self.local_user_scale,
            });
        }
        Ok(())
    }
}

/// What one particle should look like this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionTarget {
    pub radius: f32,
    /// rad/s
    pub angular_velocity: f32,
    /// Slot size for the current swarm count, before breath and emphasis
    pub size_scale: f32,
    /// Breath pulse times local-user emphasis, applied on top of `size_scale`
    pub scale_gain: f32,
    /// `previous_angle` advanced by `angular_velocity × dt`, in [0, τ)
    pub angle: f32,
    /// Resting angle of the particle's slot
    pub slot_angle: f32,
    /// Ambient offset: x radial, y perpendicular to the radius (scene units)
    pub drift: Vec2,
}

impl MotionTarget {
    /// Drawn size this frame
    #[inline]
    pub fn scale(&self) -> f32 {
        self.size_scale * self.scale_gain
    }
}

/// Advance an orbit angle, wrapped to [0, τ)
#[inline]
pub fn integrate_angle(previous_angle: f32, angular_velocity: f32, dt: f32) -> f32 {
    wrap_angle(previous_angle + angular_velocity * dt.max(0.0))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitalMotionModel {
    config: OrbitConfig,
}

impl OrbitalMotionModel {
    pub fn new(config: OrbitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Orbit radius for a breath depth and a particle's radial seed.
    ///
    /// Decreasing in `depth`; always inside [min_radius, max_radius]. With a
    /// zero shell spread this is exactly `lerp(min, max, 1 - depth)`.
    pub fn orbit_radius(&self, depth: f32, radius_seed: f32) -> f32 {
        let c = &self.config;
        let depth = depth.clamp(0.0, 1.0);
        let seed = radius_seed.clamp(0.0, 1.0);
        let u = (1.0 - depth) * (1.0 - c.shell_spread) + c.shell_spread * seed;
        lerp(c.min_radius, c.max_radius, u).clamp(c.min_radius, c.max_radius)
    }

    /// Kepler speed factor relative to an empty breath at max radius, clamped
    pub fn velocity_factor(&self, radius: f32, depth: f32, speed_bias: f32) -> f32 {
        let c = &self.config;
        let apparent_mass = 1.0 + c.inhale_mass_gain * depth.clamp(0.0, 1.0);
        let r = radius.max(c.min_radius);
        let kepler = (apparent_mass * c.max_radius / r).sqrt();
        let jitter = 1.0 + c.speed_jitter * speed_bias.clamp(-1.0, 1.0);
        (kepler * jitter).clamp(c.min_velocity_factor, c.max_velocity_factor)
    }

    #[inline]
    pub fn angular_velocity(&self, radius: f32, depth: f32, speed_bias: f32) -> f32 {
        self.config.base_speed * self.velocity_factor(radius, depth, speed_bias)
    }

    /// Ambient drift at `epoch_seconds`: x radial, y perpendicular.
    ///
    /// The sinusoid arguments are reduced to one period in f64 before the
    /// cast, so large timestamps keep full phase precision.
    pub fn ambient_drift(&self, epoch_seconds: f64, seeds: &MotionSeeds, gain: f32) -> Vec2 {
        use std::f64::consts::TAU;
        let c = &self.config;
        let cycles = epoch_seconds * c.wobble_frequency as f64 * seeds.wobble_rate as f64;
        let phase = seeds.wobble_phase as f64;
        let radial_arg = (cycles.rem_euclid(1.0) * TAU + phase) as f32;
        let perp_arg = ((cycles * WOBBLE_RATIO).rem_euclid(1.0) * TAU + 2.0 * phase) as f32;
        Vec2::new(
            c.wobble_radial * gain * radial_arg.sin(),
            c.wobble_perpendicular * gain * perp_arg.sin(),
        )
    }

    /// Size multiplier from the breath and the local-user emphasis
    pub fn scale_gain(&self, depth: f32, is_local_user: bool) -> f32 {
        let c = &self.config;
        let pulse = 1.0 + c.breath_scale_pulse * depth.clamp(0.0, 1.0);
        let emphasis = if is_local_user { c.local_user_scale } else { 1.0 };
        pulse * emphasis
    }

    pub fn target_scale(&self, size_scale: f32, depth: f32, is_local_user: bool) -> f32 {
        size_scale * self.scale_gain(depth, is_local_user)
    }

    /// Targets for one particle this frame
    pub fn compute_target(
        &self,
        breath: &BreathState,
        identity: &ParticleIdentity,
        previous_angle: f32,
        dt: f32,
    ) -> MotionTarget {
        let depth = breath.depth() as f32;
        let radius = self.orbit_radius(depth, identity.radius_seed());
        let angular_velocity = self.angular_velocity(radius, depth, identity.seeds.speed_bias);
        MotionTarget {
            radius,
            angular_velocity,
            size_scale: identity.slot.size_scale,
            scale_gain: self.scale_gain(depth, identity.is_local_user),
            angle: integrate_angle(previous_angle, angular_velocity, dt),
            slot_angle: identity.angular_seed(),
            drift: self.ambient_drift(breath.epoch_seconds, &identity.seeds, identity.mood.wobble_gain()),
        }
    }
}
