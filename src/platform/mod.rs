//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (`Date.now()` on web, `SystemTime` natively)
//! - The JS-facing swarm handle (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seconds since the Unix epoch, as the breath clock expects
#[cfg(target_arch = "wasm32")]
pub fn now_epoch_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Seconds since the Unix epoch, as the breath clock expects
#[cfg(not(target_arch = "wasm32"))]
pub fn now_epoch_seconds() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    // A clock set before 1970 reads as the epoch
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}
