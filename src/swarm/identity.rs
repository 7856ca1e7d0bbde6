//! Particle identities
//!
//! One identity per admitted participant. Everything a frame needs that does
//! not change from frame to frame is resolved here, once, at admission: the
//! mood (from the presence layer's free-form tag), the slot, and the per-id
//! motion seeds.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hasher;

use fnv::FnvHasher;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::orbit::SlotAssignment;

/// Stable participant key supplied by the presence layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(String);

impl ParticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// FNV-1a of the id bytes; identical on every platform
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write(self.0.as_bytes());
        hasher.finish()
    }
}

impl From<&str> for ParticleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ParticleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ParticleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant mood, resolved from the presence layer's category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Calm,
    Grateful,
    Hopeful,
    Anxious,
    Tired,
    Joyful,
    #[default]
    Unspecified,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Grateful => "grateful",
            Mood::Hopeful => "hopeful",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
            Mood::Joyful => "joyful",
            Mood::Unspecified => "unspecified",
        }
    }

    /// Parse a presence tag; `None` for tags we don't recognize
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "calm" | "peaceful" => Some(Mood::Calm),
            "grateful" | "gratitude" => Some(Mood::Grateful),
            "hopeful" | "hope" => Some(Mood::Hopeful),
            "anxious" | "anxiety" | "stressed" => Some(Mood::Anxious),
            "tired" | "exhausted" => Some(Mood::Tired),
            "joyful" | "joy" | "happy" => Some(Mood::Joyful),
            "" | "unspecified" | "none" => Some(Mood::Unspecified),
            _ => None,
        }
    }

    /// Like [`Mood::from_tag`], falling back to `Unspecified`
    pub fn resolve(tag: &str) -> Self {
        match Self::from_tag(tag) {
            Some(mood) => mood,
            None => {
                log::warn!("Unknown mood tag {:?}, using unspecified", tag);
                Mood::Unspecified
            }
        }
    }

    /// Marker tint (linear RGB)
    pub fn tint(&self) -> Vec3 {
        match self {
            Mood::Calm => Vec3::new(0.45, 0.85, 0.82),
            Mood::Grateful => Vec3::new(0.98, 0.78, 0.38),
            Mood::Hopeful => Vec3::new(0.55, 0.90, 0.50),
            Mood::Anxious => Vec3::new(0.72, 0.60, 0.95),
            Mood::Tired => Vec3::new(0.45, 0.55, 0.85),
            Mood::Joyful => Vec3::new(0.98, 0.55, 0.50),
            Mood::Unspecified => Vec3::new(0.90, 0.92, 0.95),
        }
    }

    /// Multiplier on the ambient wobble amplitude
    pub fn wobble_gain(&self) -> f32 {
        match self {
            Mood::Calm => 0.7,
            Mood::Tired => 0.5,
            Mood::Anxious => 1.5,
            Mood::Joyful => 1.25,
            Mood::Grateful | Mood::Hopeful | Mood::Unspecified => 1.0,
        }
    }
}

/// Per-id motion seeds, derived from the id alone so every client agrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSeeds {
    /// Wobble frequency multiplier, in [0.75, 1.25)
    pub wobble_rate: f32,
    /// Wobble phase offset, in [0, τ)
    pub wobble_phase: f32,
    /// Speed variation, in [-1, 1)
    pub speed_bias: f32,
}

impl MotionSeeds {
    pub fn from_id(id: &ParticleId) -> Self {
        let mut rng = Pcg32::seed_from_u64(id.stable_hash());
        Self {
            wobble_rate: rng.random_range(0.75..1.25),
            wobble_phase: rng.random_range(0.0..std::f32::consts::TAU),
            speed_bias: rng.random_range(-1.0..1.0),
        }
    }
}

/// A swarm member. Owned exclusively by the swarm's arena.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleIdentity {
    pub id: ParticleId,
    /// Raw tag as last reported, compared verbatim during reconciliation
    pub tag: String,
    pub mood: Mood,
    pub is_local_user: bool,
    /// Slot index the spacing seeds were assigned for
    pub slot_index: usize,
    pub slot: SlotAssignment,
    pub seeds: MotionSeeds,
}

impl ParticleIdentity {
    pub fn new(
        id: ParticleId,
        tag: impl Into<String>,
        mood: Mood,
        is_local_user: bool,
        slot_index: usize,
        slot: SlotAssignment,
    ) -> Self {
        let seeds = MotionSeeds::from_id(&id);
        Self {
            id,
            tag: tag.into(),
            mood,
            is_local_user,
            slot_index,
            slot,
            seeds,
        }
    }

    #[inline]
    pub fn angular_seed(&self) -> f32 {
        self.slot.angular_seed
    }

    #[inline]
    pub fn radius_seed(&self) -> f32 {
        self.slot.radius_seed
    }
}
