//! Swarm module
//!
//! The owning context for everything keyed by participant:
//! - `identity`: ids, moods, per-id motion seeds
//! - `reconcile`: presence list diff into admit/evict/retag events
//! - `state`: the `Swarm` arena and the per-frame pipeline

pub mod identity;
pub mod reconcile;
pub mod state;

pub use identity::{Mood, MotionSeeds, ParticleId, ParticleIdentity};
pub use reconcile::{Participant, SwarmEvent, reconcile};
pub use state::{Frame, ParticleFrame, Swarm, particle_position};
