//! Participant reconciliation
//!
//! Diffs the tracked identities against the presence layer's current list and
//! produces explicit admit/evict/retag events. Order is deterministic:
//! evictions (tracked order), then retags (tracked order), then admissions
//! (presence order).

use fnv::{FnvHashMap, FnvHashSet};
use serde::{Deserialize, Serialize};

use super::identity::{Mood, ParticleId, ParticleIdentity};

/// One entry of the presence layer's participant list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticleId,
    /// Free-form category tag (mood)
    #[serde(default, alias = "category_tag", alias = "mood")]
    pub category: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticleId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SwarmEvent {
    Admitted { id: ParticleId, tag: String, mood: Mood },
    Evicted { id: ParticleId },
    /// The participant's tag changed while it stayed in the swarm
    Retagged { id: ParticleId, tag: String, mood: Mood },
}

impl SwarmEvent {
    pub fn id(&self) -> &ParticleId {
        match self {
            SwarmEvent::Admitted { id, .. }
            | SwarmEvent::Evicted { id }
            | SwarmEvent::Retagged { id, .. } => id,
        }
    }
}

/// Set difference between `tracked` and `current`.
///
/// Repeated ids in `current` are ignored after their first occurrence. Tags
/// are only interpreted for admissions and retags.
pub fn reconcile(tracked: &[ParticleIdentity], current: &[Participant]) -> Vec<SwarmEvent> {
    let mut present: FnvHashMap<&str, &Participant> = FnvHashMap::default();
    present.reserve(current.len());
    let mut ordered: Vec<&Participant> = Vec::with_capacity(current.len());
    for participant in current {
        if present.contains_key(participant.id.as_str()) {
            log::warn!("Duplicate participant {} ignored", participant.id);
            continue;
        }
        present.insert(participant.id.as_str(), participant);
        ordered.push(participant);
    }

    let known: FnvHashSet<&str> = tracked.iter().map(|p| p.id.as_str()).collect();
    let mut events = Vec::new();

    for identity in tracked {
        if !present.contains_key(identity.id.as_str()) {
            events.push(SwarmEvent::Evicted {
                id: identity.id.clone(),
            });
        }
    }

    for identity in tracked {
        if let Some(participant) = present.get(identity.id.as_str()) {
            if participant.category != identity.tag {
                events.push(SwarmEvent::Retagged {
                    id: identity.id.clone(),
                    tag: participant.category.clone(),
                    mood: Mood::resolve(&participant.category),
                });
            }
        }
    }

    for participant in ordered {
        if !known.contains(participant.id.as_str()) {
            events.push(SwarmEvent::Admitted {
                id: participant.id.clone(),
                tag: participant.category.clone(),
                mood: Mood::resolve(&participant.category),
            });
        }
    }

    events
}
