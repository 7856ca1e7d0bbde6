//! Swarm state and the per-frame pipeline
//!
//! `Swarm` is the single owner of everything that lives longer than a frame:
//! - the identity arena (admission order) and its id index
//! - the smoother's per-id render states
//! - the last observed breath phase, for transition events
//!
//! Each frame: reconcile participants, apply events, read the breath clock,
//! then compute targets and smooth every particle independently.

use fnv::{FnvHashMap, FnvHashSet};
use glam::{Vec2, Vec3};
use serde::Serialize;

use super::identity::{Mood, ParticleId, ParticleIdentity};
use super::reconcile::{Participant, SwarmEvent, reconcile};
use crate::breath::{BreathClock, BreathState, PhaseType};
use crate::config::SwarmConfig;
use crate::error::ConfigError;
use crate::orbit::{FrameSmoother, OrbitalMotionModel, ParticleRenderState, SpacingAllocator};
use crate::polar_to_cartesian;

/// Drawn state of one particle, ready for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct ParticleFrame {
    pub id: ParticleId,
    pub mood: Mood,
    pub is_local_user: bool,
    pub slot_index: usize,
    pub radius: f32,
    pub angle: f32,
    pub scale: f32,
    pub opacity: f32,
    pub angular_velocity: f32,
    /// Scene position including the ambient drift
    pub position: Vec2,
    pub tint: Vec3,
}

/// Output of one [`Swarm::frame`] call
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub breath: BreathState,
    /// One entry per tracked participant, in admission order
    pub particles: Vec<ParticleFrame>,
    /// Membership changes applied this frame
    pub events: Vec<SwarmEvent>,
    /// The breath phase differs from the previous frame's
    pub phase_changed: bool,
}

/// Scene position for a smoothed orbit plus drift (x radial, y perpendicular)
#[inline]
pub fn particle_position(radius: f32, angle: f32, drift: Vec2) -> Vec2 {
    let tangent = Vec2::new(-angle.sin(), angle.cos());
    polar_to_cartesian(radius + drift.x, angle) + tangent * drift.y
}

#[derive(Debug, Clone)]
pub struct Swarm {
    config: SwarmConfig,
    clock: BreathClock,
    model: OrbitalMotionModel,
    allocator: SpacingAllocator,
    smoother: FrameSmoother,
    /// Admission order
    particles: Vec<ParticleIdentity>,
    index: FnvHashMap<ParticleId, usize>,
    local_user: Option<ParticleId>,
    last_phase: Option<PhaseType>,
}

impl Swarm {
    pub fn new(config: SwarmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = BreathClock::new(config.breath);
        let model = OrbitalMotionModel::new(config.orbit)?;
        let allocator = SpacingAllocator::new(config.spacing)?;
        let smoother = FrameSmoother::new(config.smoothing, config.orbit.max_radius)?;
        log::info!(
            "Swarm initialized: {:.1}s cycle, compact slots {}",
            clock.total_cycle_seconds(),
            config.compact_slots
        );
        Ok(Self {
            config,
            clock,
            model,
            allocator,
            smoother,
            particles: Vec::new(),
            index: FnvHashMap::default(),
            local_user: None,
            last_phase: None,
        })
    }

    /// Mark `id` as the local participant (drawn with emphasis)
    pub fn with_local_user(mut self, id: impl Into<ParticleId>) -> Self {
        self.set_local_user(Some(id.into()));
        self
    }

    pub fn set_local_user(&mut self, id: Option<ParticleId>) {
        for identity in &mut self.particles {
            identity.is_local_user = id.as_ref() == Some(&identity.id);
        }
        self.local_user = id;
    }

    pub fn local_user(&self) -> Option<&ParticleId> {
        self.local_user.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &BreathClock {
        &self.clock
    }

    pub fn breath_state(&self, now_epoch_seconds: f64) -> BreathState {
        self.clock.state_at(now_epoch_seconds)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Tracked identities in admission order
    pub fn identities(&self) -> &[ParticleIdentity] {
        &self.particles
    }

    pub fn identity(&self, id: &str) -> Option<&ParticleIdentity> {
        self.index.get(id).map(|&i| &self.particles[i])
    }

    /// Smoothed state for `id`; untracked ids get the parked default
    pub fn render_state(&self, id: &str) -> ParticleRenderState {
        self.smoother.render_state(id)
    }

    /// Replace the configuration. Everything is rebuilt and participants are
    /// re-admitted on the next frame; the local user is kept.
    pub fn reconfigure(&mut self, config: SwarmConfig) -> Result<(), ConfigError> {
        let mut next = Swarm::new(config)?;
        next.local_user = self.local_user.take();
        *self = next;
        Ok(())
    }

    /// Apply membership events in order
    pub fn apply(&mut self, events: &[SwarmEvent]) {
        let before = self.particles.len();

        let evicted: FnvHashSet<&str> = events
            .iter()
            .filter_map(|e| match e {
                SwarmEvent::Evicted { id } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        if !evicted.is_empty() {
            self.particles.retain(|p| !evicted.contains(p.id.as_str()));
            for id in &evicted {
                self.smoother.evict(id);
                log::debug!("Evicted {id}");
            }
            if self.config.compact_slots {
                for (position, identity) in self.particles.iter_mut().enumerate() {
                    identity.slot_index = position;
                }
            }
            self.rebuild_index();
        }

        let mut used: FnvHashSet<usize> = self.particles.iter().map(|p| p.slot_index).collect();
        let mut cursor = 0;
        for event in events {
            match event {
                SwarmEvent::Evicted { .. } => {}
                SwarmEvent::Retagged { id, tag, mood } => {
                    if let Some(&i) = self.index.get(id.as_str()) {
                        let identity = &mut self.particles[i];
                        identity.tag.clone_from(tag);
                        identity.mood = *mood;
                    }
                }
                SwarmEvent::Admitted { id, tag, mood } => {
                    if self.index.contains_key(id.as_str()) {
                        continue;
                    }
                    let slot_index = if self.config.compact_slots {
                        self.particles.len()
                    } else {
                        while used.contains(&cursor) {
                            cursor += 1;
                        }
                        cursor
                    };
                    used.insert(slot_index);
                    // Placeholder until the size refresh below
                    let slot = self
                        .allocator
                        .assign(slot_index, self.particles.len() + 1)
                        .unwrap_or_default();
                    let is_local = self.local_user.as_ref() == Some(id);
                    log::debug!("Admitted {id} ({}) at slot {slot_index}", mood.as_str());
                    self.index.insert(id.clone(), self.particles.len());
                    self.particles
                        .push(ParticleIdentity::new(id.clone(), tag.clone(), *mood, is_local, slot_index, slot));
                }
            }
        }

        if self.particles.len() != before || !evicted.is_empty() {
            self.refresh_slots();
        }
    }

    /// Run one frame for the current participant list
    pub fn frame(&mut self, participants: &[Participant], now_epoch_seconds: f64, dt: f32) -> Frame {
        let events = reconcile(&self.particles, participants);
        self.apply(&events);

        let breath = self.clock.state_at(now_epoch_seconds);
        let phase_changed = self.last_phase.is_some_and(|p| p != breath.phase_type);
        if phase_changed {
            log::debug!(
                "Breath phase {} (cycle {})",
                breath.phase_type.label(),
                breath.cycle_index
            );
        }
        self.last_phase = Some(breath.phase_type);

        let mut particles = Vec::with_capacity(self.particles.len());
        for identity in &self.particles {
            let previous_angle = self
                .smoother
                .get(identity.id.as_str())
                .map_or(identity.angular_seed(), |s| s.current_angle);
            let target = self.model.compute_target(&breath, identity, previous_angle, dt);
            let state = self.smoother.advance(&identity.id, &target, dt);
            particles.push(ParticleFrame {
                id: identity.id.clone(),
                mood: identity.mood,
                is_local_user: identity.is_local_user,
                slot_index: identity.slot_index,
                radius: state.current_radius,
                angle: state.current_angle,
                scale: state.current_scale,
                opacity: state.current_opacity,
                angular_velocity: state.current_angular_velocity,
                position: particle_position(state.current_radius, state.current_angle, target.drift),
                tint: identity.mood.tint(),
            });
        }

        Frame {
            breath,
            particles,
            events,
            phase_changed,
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, identity) in self.particles.iter().enumerate() {
            self.index.insert(identity.id.clone(), i);
        }
    }

    /// Re-derive every slot for the current count (sizes depend on it)
    fn refresh_slots(&mut self) {
        let total = self.particles.len();
        for identity in &mut self.particles {
            if let Some(slot) = self.allocator.assign(identity.slot_index, total) {
                identity.slot = slot;
            }
        }
    }
}
