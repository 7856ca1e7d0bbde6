//! Easing curves
//!
//! Every curve maps `t` in [0, 1] onto [0, 1], is monotonic, and pins the
//! endpoints (0 → 0, 1 → 1). Inputs outside [0, 1] are clamped first.

use std::f64::consts::PI;

/// Weight of the smootherstep blend in [`hold_settle`]
pub const HOLD_SETTLE_WEIGHT: f64 = 0.35;

#[inline]
fn unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: where `value` sits between `a` and `b` (unclamped)
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Cubic Hermite smoothstep (zero slope at both ends)
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = unit(t);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic smootherstep (zero slope and curvature at both ends)
#[inline]
pub fn smootherstep(t: f64) -> f64 {
    let t = unit(t);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Half-cosine ease in/out
#[inline]
pub fn ease_in_out_sine(t: f64) -> f64 {
    let t = unit(t);
    0.5 - 0.5 * (PI * t).cos()
}

#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = unit(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Near-linear curve for hold phases.
///
/// A straight ramp blended with [`smootherstep`], so the slope at both ends
/// drops to `1 - HOLD_SETTLE_WEIGHT` instead of stopping dead.
#[inline]
pub fn hold_settle(t: f64) -> f64 {
    let t = unit(t);
    t + HOLD_SETTLE_WEIGHT * (smootherstep(t) - t)
}

/// Rounded square wave, normalized to [0, 1].
///
/// `atan(sin(x) / delta) / atan(1 / delta)` over the rising half period.
/// Small `delta` gives a steep middle with long flat shoulders; large `delta`
/// approaches [`ease_in_out_sine`]. `delta` must be positive.
pub fn rounded_wave(t: f64, delta: f64) -> f64 {
    let t = unit(t);
    let x = PI * (t - 0.5);
    let norm = (1.0 / delta).atan();
    let v = 0.5 + 0.5 * (x.sin() / delta).atan() / norm;
    v.clamp(0.0, 1.0)
}
