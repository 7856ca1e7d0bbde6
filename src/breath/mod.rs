//! Breath clock module
//!
//! Everything here is a pure function of wall-clock time:
//! - No per-instance mutable state
//! - No clock reads (the host passes `now` in)
//! - Configuration validated once, at construction

pub mod clock;
pub mod config;
pub mod curve;

pub use clock::{BreathClock, BreathState, compute_breath_state};
pub use config::{BreathCycleConfig, BreathCycleSeconds, BreathPattern, PhaseType};
pub use curve::BreathCurve;
