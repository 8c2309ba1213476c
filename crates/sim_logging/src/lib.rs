#![deny(missing_docs)]
//! Shared logging utilities for the AIREX simulator workspace.
//!
//! This crate provides the `sim_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the simulated tick count of the current thread, so log lines
//! from interleaved task timers can be lined up after the fact.

use std::cell::Cell;

thread_local! {
    /// Timers fired so far by the event loop running on this thread.
    static SIM_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Records how many timers the event loop on this thread has fired.
pub fn set_sim_tick(tick: u64) {
    SIM_TICK.with(|tick_cell| tick_cell.set(tick));
}

/// Tick stamp used by the `sim_*` macros; 0 before the first timer fires.
pub fn get_sim_tick() -> u64 {
    SIM_TICK.with(Cell::get)
}

/// Logs a trace-level message tagged with the current simulated tick.
#[macro_export]
macro_rules! sim_trace {
    ($($arg:tt)*) => {{
        log::trace!("[tick {}] {}", $crate::get_sim_tick(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current simulated tick.
#[macro_export]
macro_rules! sim_debug {
    ($($arg:tt)*) => {{
        log::debug!("[tick {}] {}", $crate::get_sim_tick(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current simulated tick.
#[macro_export]
macro_rules! sim_info {
    ($($arg:tt)*) => {{
        log::info!("[tick {}] {}", $crate::get_sim_tick(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current simulated tick.
#[macro_export]
macro_rules! sim_warn {
    ($($arg:tt)*) => {{
        log::warn!("[tick {}] {}", $crate::get_sim_tick(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current simulated tick.
#[macro_export]
macro_rules! sim_error {
    ($($arg:tt)*) => {{
        log::error!("[tick {}] {}", $crate::get_sim_tick(), format_args!($($arg)*));
    }};
}

/// Routes log output through the test harness so it only shows for failing
/// tests. Later calls in the same process are ignored.
pub fn initialize_for_tests() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}
