//! Whole-frame tests through the public API

use breath_swarm::breath::BreathPattern;
use breath_swarm::consts::*;
use breath_swarm::{Participant, PhaseType, Swarm, SwarmConfig, SwarmEvent};

/// A multiple of every default cycle length used here (16s)
const START: f64 = 1_700_000_000.0;

fn roster(ids: &[&str]) -> Vec<Participant> {
    ids.iter().map(|id| Participant::new(*id, "calm")).collect()
}

fn run(swarm: &mut Swarm, participants: &[Participant], fps: f64, seconds: f64) {
    let dt = 1.0 / fps;
    let frames = (seconds * fps).round() as usize;
    for k in 0..=frames {
        swarm.frame(participants, START + k as f64 * dt, dt as f32);
    }
}

#[test]
fn test_identical_inputs_identical_frames() {
    let participants = roster(&["a", "b", "c", "d"]);
    let mut left = Swarm::new(SwarmConfig::default()).unwrap();
    let mut right = Swarm::new(SwarmConfig::default()).unwrap();
    for k in 0..300 {
        let now = START + k as f64 / 60.0;
        let a = serde_json::to_string(&left.frame(&participants, now, 1.0 / 60.0)).unwrap();
        let b = serde_json::to_string(&right.frame(&participants, now, 1.0 / 60.0)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_clients_at_different_frame_rates_agree() {
    let participants = roster(&["a", "b", "c"]);
    let mut slow = Swarm::new(SwarmConfig::default()).unwrap();
    let mut fast = Swarm::new(SwarmConfig::default()).unwrap();
    // Box breathing: the swarm sits at full inhale from 4s to 8s
    run(&mut slow, &participants, 30.0, 7.9);
    run(&mut fast, &participants, 120.0, 7.9);

    assert_eq!(slow.breath_state(START + 7.9).phase_type, PhaseType::HoldIn);
    for id in ["a", "b", "c"] {
        let s = slow.render_state(id);
        let f = fast.render_state(id);
        assert!((s.current_radius - f.current_radius).abs() < 1e-3, "{id}");
        assert!((s.current_scale - f.current_scale).abs() < 1e-3, "{id}");
    }
}

#[test]
fn test_swarm_contracts_on_inhale() {
    let participants = roster(&["a", "b", "c", "d", "e"]);
    let mut swarm = Swarm::new(SwarmConfig::default()).unwrap();
    run(&mut swarm, &participants, 60.0, 0.0);
    let exhaled: f32 = participants
        .iter()
        .map(|p| swarm.render_state(p.id.as_str()).current_radius)
        .sum();
    run(&mut swarm, &participants, 60.0, 7.5);
    let inhaled: f32 = participants
        .iter()
        .map(|p| swarm.render_state(p.id.as_str()).current_radius)
        .sum();
    assert!(inhaled < exhaled);
    for p in &participants {
        let r = swarm.render_state(p.id.as_str()).current_radius;
        assert!((MIN_ORBIT_RADIUS..=MAX_ORBIT_RADIUS).contains(&r));
    }
}

#[test]
fn test_join_and_leave() {
    let mut swarm = Swarm::new(SwarmConfig::default()).unwrap();
    let frame = swarm.frame(&roster(&["a", "b"]), START, 0.0);
    assert!(matches!(frame.events[0], SwarmEvent::Admitted { .. }));
    assert_eq!(swarm.len(), 2);

    let frame = swarm.frame(&roster(&["b", "c"]), START + 0.016, 0.016);
    assert_eq!(frame.events.len(), 2);
    assert!(matches!(&frame.events[0], SwarmEvent::Evicted { id } if id.as_str() == "a"));
    assert!(matches!(&frame.events[1], SwarmEvent::Admitted { id, .. } if id.as_str() == "c"));

    // Departed ids read as parked and invisible
    let gone = swarm.render_state("a");
    assert_eq!(gone.current_radius, MAX_ORBIT_RADIUS);
    assert_eq!(gone.current_angular_velocity, 0.0);
    assert_eq!(gone.current_opacity, 0.0);

    let frame = swarm.frame(&[], START + 0.032, 0.016);
    assert!(frame.particles.is_empty());
    assert!(swarm.is_empty());
}

#[test]
fn test_newcomer_starts_on_its_slot() {
    let mut swarm = Swarm::new(SwarmConfig::default()).unwrap();
    let frame = swarm.frame(&roster(&["a"]), START, 1.0 / 60.0);
    let a = &frame.particles[0];
    let identity = swarm.identity("a").unwrap();
    // First frame: the slot angle advanced by one frame of motion
    let expected = identity.angular_seed() + a.angular_velocity / 60.0;
    assert!((a.angle - expected).abs() < 1e-4);
    assert_eq!(a.opacity, 1.0);
}

#[test]
fn test_reconfigure_hot_reload() {
    let mut swarm = Swarm::new(SwarmConfig::default()).unwrap().with_local_user("me");
    swarm.frame(&roster(&["me", "you"]), START, 0.0);

    swarm
        .reconfigure(SwarmConfig::from_pattern(BreathPattern::Relaxing))
        .unwrap();
    assert!(swarm.is_empty());
    assert_eq!(swarm.clock().total_cycle_seconds(), 19.0);

    let frame = swarm.frame(&roster(&["me", "you"]), START + 1.0, 0.016);
    assert_eq!(frame.particles.len(), 2);
    assert!(frame.particles.iter().any(|p| p.is_local_user && p.id.as_str() == "me"));
}

#[test]
fn test_frame_json_shape() {
    let mut swarm = Swarm::new(SwarmConfig::default()).unwrap();
    let frame = swarm.frame(&[Participant::new("a", "joy")], START + 2.0, 0.0);
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["breath"]["phase_type"], "inhale");
    assert_eq!(json["particles"][0]["id"], "a");
    assert_eq!(json["particles"][0]["mood"], "joyful");
    assert_eq!(json["events"][0]["event"], "admitted");
    assert_eq!(json["phase_changed"], false);
}

#[test]
fn test_relaxing_breath_scenario() {
    let swarm = Swarm::new(SwarmConfig::from_pattern(BreathPattern::Relaxing)).unwrap();
    let a = swarm.breath_state(2.0);
    assert_eq!(a.phase_type, PhaseType::Inhale);
    assert_eq!(a.raw_progress, 0.5);
    let b = swarm.breath_state(21.0);
    assert_eq!(a.phase_type, b.phase_type);
    for (x, y) in [
        (a.cycle_elapsed_seconds, b.cycle_elapsed_seconds),
        (a.cycle_progress, b.cycle_progress),
        (a.raw_progress, b.raw_progress),
        (a.eased_progress, b.eased_progress),
        (a.phase_remaining_seconds, b.phase_remaining_seconds),
    ] {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    assert_eq!(b.cycle_index, a.cycle_index + 1);
}
