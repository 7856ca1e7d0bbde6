//! Shared breath clock
//!
//! Maps wall-clock time onto the breath cycle. The result depends only on the
//! timestamp and the configuration, so every client evaluating the same
//! instant lands on the same phase without talking to anyone.

use serde::{Deserialize, Serialize};

use super::config::{BreathCycleConfig, PhaseType};

/// Where the shared breath is at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathState {
    /// Timestamp this state was evaluated at (Unix seconds)
    pub epoch_seconds: f64,
    /// Whole cycles completed since the epoch
    pub cycle_index: i64,
    /// Seconds into the current cycle, in [0, total)
    pub cycle_elapsed_seconds: f64,
    /// Position in the whole cycle, in [0, 1)
    pub cycle_progress: f64,
    pub phase_type: PhaseType,
    /// Linear progress within the current sub-phase, in [0, 1)
    pub raw_progress: f64,
    /// `raw_progress` through the phase's easing curve, in [0, 1]
    pub eased_progress: f64,
    /// Seconds until the next sub-phase begins
    pub phase_remaining_seconds: f64,
}

impl BreathState {
    /// How full the breath is, in [0, 1].
    ///
    /// Rises through the inhale, stays full through hold-in, falls through the
    /// exhale and stays empty through hold-out. Continuous across boundaries.
    ///
    /// Holds report a constant depth; their settle-eased progress only drives
    /// UI collaborators (hold countdowns, label fades), never the swarm.
    pub fn depth(&self) -> f64 {
        match self.phase_type {
            PhaseType::Inhale => self.eased_progress,
            PhaseType::HoldIn => 1.0,
            PhaseType::Exhale => 1.0 - self.eased_progress,
            PhaseType::HoldOut => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.phase_type.label()
    }
}

/// Evaluate the breath cycle at `now_epoch_seconds`.
///
/// Floor-mod is applied to the raw input before any other arithmetic so that
/// multi-year timestamps keep full sub-cycle precision.
pub fn compute_breath_state(now_epoch_seconds: f64, config: &BreathCycleConfig) -> BreathState {
    let total = config.total_cycle_seconds();
    let mut elapsed = now_epoch_seconds.rem_euclid(total);
    // rem_euclid rounds up to `total` for tiny negative inputs
    if elapsed >= total {
        elapsed = 0.0;
    }
    let cycle_index = ((now_epoch_seconds - elapsed) / total).round() as i64;

    let curve = config.curve();
    let mut start = 0.0;
    for phase in PhaseType::ALL {
        let duration = config.duration(phase);
        let end = start + duration;
        if duration > 0.0 && elapsed < end {
            let raw = ((elapsed - start) / duration).max(0.0);
            // Upper bound is exclusive: a rounded-up 1.0 belongs to the next phase
            if raw < 1.0 {
                return BreathState {
                    epoch_seconds: now_epoch_seconds,
                    cycle_index,
                    cycle_elapsed_seconds: elapsed,
                    cycle_progress: elapsed / total,
                    phase_type: phase,
                    raw_progress: raw,
                    eased_progress: curve.ease(phase, raw),
                    phase_remaining_seconds: end - elapsed,
                };
            }
        }
        start = end;
    }

    // Only reachable when rounding pushed `elapsed` past the last phase:
    // roll over into the next cycle's inhale.
    let phase = PhaseType::Inhale;
    BreathState {
        epoch_seconds: now_epoch_seconds,
        cycle_index: cycle_index + 1,
        cycle_elapsed_seconds: 0.0,
        cycle_progress: 0.0,
        phase_type: phase,
        raw_progress: 0.0,
        eased_progress: curve.ease(phase, 0.0),
        phase_remaining_seconds: config.duration(phase),
    }
}

/// A validated cycle configuration with convenience queries on top of
/// [`compute_breath_state`]. Cheap to copy; holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BreathClock {
    config: BreathCycleConfig,
}

impl BreathClock {
    pub fn new(config: BreathCycleConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &BreathCycleConfig {
        &self.config
    }

    #[inline]
    pub fn total_cycle_seconds(&self) -> f64 {
        self.config.total_cycle_seconds()
    }

    #[inline]
    pub fn state_at(&self, now_epoch_seconds: f64) -> BreathState {
        compute_breath_state(now_epoch_seconds, &self.config)
    }

    /// Epoch time at which the phase active at `now_epoch_seconds` ends
    pub fn next_transition_after(&self, now_epoch_seconds: f64) -> f64 {
        now_epoch_seconds + self.state_at(now_epoch_seconds).phase_remaining_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{BreathCurve, BreathPattern};
    use proptest::prelude::*;

    fn relaxing() -> BreathCycleConfig {
        BreathCycleConfig::new(4.0, 7.0, 8.0, 0.0).unwrap()
    }

    fn same_bits(a: &BreathState, b: &BreathState) -> bool {
        a.phase_type == b.phase_type
            && a.cycle_elapsed_seconds.to_bits() == b.cycle_elapsed_seconds.to_bits()
            && a.cycle_progress.to_bits() == b.cycle_progress.to_bits()
            && a.raw_progress.to_bits() == b.raw_progress.to_bits()
            && a.eased_progress.to_bits() == b.eased_progress.to_bits()
            && a.phase_remaining_seconds.to_bits() == b.phase_remaining_seconds.to_bits()
    }

    #[test]
    fn test_inhale_midpoint() {
        let state = compute_breath_state(2.0, &relaxing());
        assert_eq!(state.phase_type, PhaseType::Inhale);
        assert_eq!(state.raw_progress, 0.5);
        assert!((state.eased_progress - 0.5).abs() < 1e-12);
        assert_eq!(state.phase_remaining_seconds, 2.0);
    }

    #[test]
    fn test_wraps_to_same_state() {
        let a = compute_breath_state(2.0, &relaxing());
        let b = compute_breath_state(21.0, &relaxing());
        assert!(same_bits(&a, &b));
        assert_eq!(b.cycle_index, 1);
        assert_eq!(b.epoch_seconds, 21.0);
    }

    #[test]
    fn test_phase_boundaries_exclusive() {
        let config = relaxing();
        // Exactly at the end of inhale: hold-in at zero
        let s = compute_breath_state(4.0, &config);
        assert_eq!(s.phase_type, PhaseType::HoldIn);
        assert_eq!(s.raw_progress, 0.0);
        // Start of exhale
        let s = compute_breath_state(11.0, &config);
        assert_eq!(s.phase_type, PhaseType::Exhale);
        assert_eq!(s.raw_progress, 0.0);
        // End of cycle wraps straight to inhale (zero-length hold-out skipped)
        let s = compute_breath_state(19.0, &config);
        assert_eq!(s.phase_type, PhaseType::Inhale);
        assert_eq!(s.raw_progress, 0.0);
        let s = compute_breath_state(18.999, &config);
        assert_eq!(s.phase_type, PhaseType::Exhale);
        assert!(s.raw_progress < 1.0);
    }

    #[test]
    fn test_zero_hold_never_reported() {
        let config = relaxing();
        for i in 0..1900 {
            let s = compute_breath_state(i as f64 * 0.01, &config);
            assert_ne!(s.phase_type, PhaseType::HoldOut);
        }
    }

    #[test]
    fn test_multi_year_uptime() {
        let config = BreathPattern::Box.config();
        // Roughly ten years of seconds, aligned to a cycle start
        let base = 16.0 * 19_723_500.0;
        let s = compute_breath_state(base + 6.0, &config);
        assert_eq!(s.phase_type, PhaseType::HoldIn);
        assert!((s.raw_progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_negative_time_floor_mod() {
        let config = relaxing();
        let s = compute_breath_state(-17.0, &config);
        assert_eq!(s.phase_type, PhaseType::Inhale);
        assert_eq!(s.raw_progress, 0.5);
        assert_eq!(s.cycle_index, -1);
    }

    #[test]
    fn test_depth_continuous_across_boundaries() {
        let config = BreathPattern::Box.config();
        for boundary in [4.0_f64, 8.0, 12.0, 16.0] {
            let before = compute_breath_state(boundary - 1e-6, &config).depth();
            let after = compute_breath_state(boundary, &config).depth();
            assert!((before - after).abs() < 1e-3, "jump at {boundary}: {before} -> {after}");
        }
    }

    #[test]
    fn test_next_transition() {
        let clock = BreathClock::new(relaxing());
        assert_eq!(clock.next_transition_after(2.0), 4.0);
        assert_eq!(clock.next_transition_after(12.0), 19.0);
        assert_eq!(clock.total_cycle_seconds(), 19.0);
    }

    #[test]
    fn test_rounded_wave_strategy_same_phases() {
        let wave = BreathCycleConfig::with_curve(
            4.0,
            7.0,
            8.0,
            0.0,
            BreathCurve::RoundedWave { delta: 0.2 },
        )
        .unwrap();
        for t in [0.5, 3.0, 5.0, 12.0, 18.0] {
            let a = compute_breath_state(t, &wave);
            let b = compute_breath_state(t, &relaxing());
            assert_eq!(a.phase_type, b.phase_type);
            assert_eq!(a.raw_progress, b.raw_progress);
        }
    }

    fn valid_config() -> impl Strategy<Value = BreathCycleConfig> {
        // Quarter-second steps keep sums exactly representable
        (1u32..80, 0u32..80, 1u32..80, 0u32..80).prop_map(|(a, b, c, d)| {
            BreathCycleConfig::new(
                a as f64 * 0.25,
                b as f64 * 0.25,
                c as f64 * 0.25,
                d as f64 * 0.25,
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_deterministic(now in 0.0f64..4.0e9, config in valid_config()) {
            let a = compute_breath_state(now, &config);
            let b = compute_breath_state(now, &config);
            prop_assert!(same_bits(&a, &b));
        }

        #[test]
        fn prop_cycle_closure(ticks in 0u64..(1 << 30), k in 0u64..100_000, config in valid_config()) {
            // 1/1024 s resolution: t and t + k * total are both exact in f64
            let t = ticks as f64 / 1024.0;
            let shifted = t + k as f64 * config.total_cycle_seconds();
            let a = compute_breath_state(t, &config);
            let b = compute_breath_state(shifted, &config);
            prop_assert!(same_bits(&a, &b));
        }

        #[test]
        fn prop_phase_coverage(now in 0.0f64..1.0e9, config in valid_config()) {
            let s = compute_breath_state(now, &config);
            prop_assert!(s.raw_progress >= 0.0 && s.raw_progress < 1.0);
            prop_assert!(s.eased_progress >= 0.0 && s.eased_progress <= 1.0);
            prop_assert!(config.duration(s.phase_type) > 0.0);
            let start = config.phase_start(s.phase_type);
            let end = start + config.duration(s.phase_type);
            // A progress that rounds up to 1.0 is reported as the next phase at zero
            prop_assert!(s.cycle_elapsed_seconds >= start - 1e-9 && s.cycle_elapsed_seconds < end);
            prop_assert!(s.cycle_elapsed_seconds < config.total_cycle_seconds());
        }
    }
}
