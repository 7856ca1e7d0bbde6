//! Frame smoothing
//!
//! A continuous-time exponential filter between the motion model's targets
//! and what gets drawn. It is the only per-particle state that survives from
//! one frame to the next.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use super::motion::MotionTarget;
use crate::consts::*;
use crate::error::{ConfigError, check_rate};
use crate::swarm::ParticleId;
use crate::{shortest_angle_delta, wrap_angle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Follow rate (1/s) for radius, angular speed and size
    pub radius_rate: f32,
    /// Glide rate (1/s) toward a newly assigned slot angle and size
    pub reflow_rate: f32,
    /// Opacity rise rate (1/s) when `fade_in` is set
    pub fade_rate: f32,
    /// Start new particles transparent instead of fully visible
    pub fade_in: bool,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            radius_rate: RADIUS_RATE,
            reflow_rate: REFLOW_RATE,
            fade_rate: FADE_RATE,
            fade_in: false,
        }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("radius_rate", self.radius_rate)?;
        check_rate("reflow_rate", self.reflow_rate)?;
        check_rate("fade_rate", self.fade_rate)?;
        Ok(())
    }
}

/// Drawn state of one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRenderState {
    pub current_radius: f32,
    /// Orbit angle including the slot offset, in [0, τ)
    pub current_angle: f32,
    pub current_scale: f32,
    pub current_opacity: f32,
    pub current_angular_velocity: f32,
    /// Slot offset already folded into `current_angle`
    pub applied_slot_angle: f32,
    /// Slot size the particle has glided to so far
    pub applied_size_scale: f32,
}

impl ParticleRenderState {
    /// Returned for ids that are not tracked: parked at the outer orbit, at
    /// rest, invisible
    pub fn untracked(max_radius: f32) -> Self {
        Self {
            current_radius: max_radius,
            current_angle: 0.0,
            current_scale: 0.0,
            current_opacity: 0.0,
            current_angular_velocity: 0.0,
            applied_slot_angle: 0.0,
            applied_size_scale: 0.0,
        }
    }
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// Never overshoots: the blend factor stays in [0, 1).
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let alpha = 1.0 - (-rate * dt.max(0.0)).exp();
    current + (target - current) * alpha
}

/// One smoothing step. `None` means the particle is seen for the first time.
///
/// The angle follows the model's integration (`target.angle`) plus the slot
/// glide; only the reported angular velocity is smoothed. Count-driven size
/// changes glide at `reflow_rate`, breath-driven ones follow at `radius_rate`.
pub fn smooth_step(
    previous: Option<&ParticleRenderState>,
    target: &MotionTarget,
    dt: f32,
    config: &SmoothingConfig,
) -> ParticleRenderState {
    let Some(prev) = previous else {
        // First observation: start on target, no fly-in
        return ParticleRenderState {
            current_radius: target.radius,
            current_angle: target.angle,
            current_scale: target.scale(),
            current_opacity: if config.fade_in { 0.0 } else { 1.0 },
            current_angular_velocity: target.angular_velocity,
            applied_slot_angle: target.slot_angle,
            applied_size_scale: target.size_scale,
        };
    };

    let rate = config.radius_rate;

    // Glide toward the slot along the short way round
    let slot_gap = shortest_angle_delta(prev.applied_slot_angle, target.slot_angle);
    let glide = damp(0.0, slot_gap, config.reflow_rate, dt);
    let size_scale = damp(prev.applied_size_scale, target.size_scale, config.reflow_rate, dt);

    ParticleRenderState {
        current_radius: damp(prev.current_radius, target.radius, rate, dt),
        current_angle: wrap_angle(target.angle + glide),
        current_scale: damp(prev.current_scale, size_scale * target.scale_gain, rate, dt),
        current_opacity: damp(prev.current_opacity, 1.0, config.fade_rate, dt),
        current_angular_velocity: damp(prev.current_angular_velocity, target.angular_velocity, rate, dt),
        applied_slot_angle: wrap_angle(prev.applied_slot_angle + glide),
        applied_size_scale: size_scale,
    }
}

/// Id-keyed smoothing state; single writer (the frame loop)
#[derive(Debug, Clone)]
pub struct FrameSmoother {
    config: SmoothingConfig,
    fallback_radius: f32,
    states: FnvHashMap<ParticleId, ParticleRenderState>,
}

impl FrameSmoother {
    /// `fallback_radius` is reported for untracked ids (normally the max orbit)
    pub fn new(config: SmoothingConfig, fallback_radius: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            fallback_radius,
            states: FnvHashMap::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Advance `id` one frame toward `target` and remember the result
    pub fn advance(&mut self, id: &ParticleId, target: &MotionTarget, dt: f32) -> ParticleRenderState {
        let next = smooth_step(self.states.get(id), target, dt, &self.config);
        match self.states.get_mut(id) {
            Some(state) => *state = next,
            None => {
                self.states.insert(id.clone(), next);
            }
        }
        next
    }

    pub fn get(&self, id: &str) -> Option<&ParticleRenderState> {
        self.states.get(id)
    }

    /// State for `id`, or the untracked default
    pub fn render_state(&self, id: &str) -> ParticleRenderState {
        self.states
            .get(id)
            .copied()
            .unwrap_or_else(|| ParticleRenderState::untracked(self.fallback_radius))
    }

    pub fn evict(&mut self, id: &str) -> bool {
        self.states.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
