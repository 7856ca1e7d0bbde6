//! Orbital motion module
//!
//! Per-particle math, leaves first:
//! - `spacing`: golden-angle slots and density-scaled sizes
//! - `motion`: breath-driven radius, speed, and ambient drift targets
//! - `smoother`: exponential follow from targets to drawn state
//!
//! No particle reads another particle's state, so updates can be partitioned
//! by id.

pub mod motion;
pub mod smoother;
pub mod spacing;

pub use motion::{MotionTarget, OrbitConfig, OrbitalMotionModel, integrate_angle};
pub use smoother::{FrameSmoother, ParticleRenderState, SmoothingConfig, damp, smooth_step};
pub use spacing::{SlotAssignment, SpacingAllocator, SpacingConfig, golden_angle_seed, radical_inverse};
