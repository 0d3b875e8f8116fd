//! Time utilities for the simulation loop

use std::time::Instant;

/// Ticks per second when the headless runner drives the loop itself.
/// The core accepts an explicit `dt`, so a host renderer may run at any rate.
pub const SIMULATION_TPS: u32 = 60;
/// Snapshot emission rate for the headless runner
pub const SNAPSHOT_TPS: u32 = 10;
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Fixed delta time for one tick (in seconds)
pub fn tick_delta() -> f32 {
    1.0 / SIMULATION_TPS as f32
}

/// Session start time for uptime tracking
static SESSION_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize session start time (call once at startup)
pub fn init_session_time() {
    SESSION_START.get_or_init(Instant::now);
}

/// Get session uptime in seconds
pub fn uptime_secs() -> u64 {
    SESSION_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}
