//! Golden-angle slot spacing
//!
//! Slot `i` sits at `i × golden angle` around the orbit, so consecutive slots
//! are maximally separated and appending slots never moves existing ones.
//! The radial seed is the base-2 radical inverse of `i`, which is likewise
//! independent of the slot count. Only the size depends on the count.

use serde::{Deserialize, Serialize};

use crate::GOLDEN_ANGLE;
use crate::consts::*;
use crate::error::ConfigError;

/// Largest f32 below 1.0
const ONE_BELOW: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Size for a swarm of one, before clamping
    pub base_size: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            base_size: BASE_SIZE,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
        }
    }
}

impl SpacingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "base_size",
                value: self.base_size,
            });
        }
        let ok = self.min_size.is_finite()
            && self.max_size.is_finite()
            && self.min_size > 0.0
            && self.min_size <= self.max_size;
        if !ok {
            return Err(ConfigError::InvalidSizeBounds {
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

/// Seeds and size for one slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Resting angle of the slot, in [0, τ)
    pub angular_seed: f32,
    /// Low-discrepancy radial seed, in [0, 1)
    pub radius_seed: f32,
    pub size_scale: f32,
}

/// Angle of slot `index`, in [0, τ)
#[inline]
pub fn golden_angle_seed(index: usize) -> f32 {
    let angle = (index as f64 * GOLDEN_ANGLE).rem_euclid(std::f64::consts::TAU) as f32;
    if angle >= std::f32::consts::TAU { 0.0 } else { angle }
}

/// Base-2 radical inverse (van der Corput sequence), in [0, 1)
#[inline]
pub fn radical_inverse(index: usize) -> f32 {
    let bits = (index as u64).reverse_bits();
    let v = bits as f64 / 18_446_744_073_709_551_616.0;
    (v as f32).min(ONE_BELOW)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpacingAllocator {
    config: SpacingConfig,
}

impl SpacingAllocator {
    pub fn new(config: SpacingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &SpacingConfig {
        &self.config
    }

    /// Marker size for a swarm of `total_count`; `None` for an empty swarm
    pub fn size_scale(&self, total_count: usize) -> Option<f32> {
        if total_count == 0 {
            return None;
        }
        let size = self.config.base_size / (total_count as f32).sqrt();
        Some(size.clamp(self.config.min_size, self.config.max_size))
    }

    /// Assignment for slot `index` in a swarm of `total_count`.
    ///
    /// Returns `None` when the swarm is empty. Slot indices are persistent
    /// keys, so after evictions `index` may exceed `total_count`.
    pub fn assign(&self, index: usize, total_count: usize) -> Option<SlotAssignment> {
        let size_scale = self.size_scale(total_count)?;
        Some(SlotAssignment {
            angular_seed: golden_angle_seed(index),
            radius_seed: radical_inverse(index),
            size_scale,
        })
    }

    /// Assignments for every slot; empty when `total_count` is zero
    pub fn assign_all(&self, total_count: usize) -> Vec<SlotAssignment> {
        (0..total_count)
            .filter_map(|i| self.assign(i, total_count))
            .collect()
    }
}
