//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Every agent performs
//! exactly one sense → interpret → act round per tick, and the mapping to
//! simulated time is held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_ms
//!
//! The default tick is 64 ms, the step the café controllers were tuned for.
//! Timers inside agents (e.g. the staff robot's preparation countdown)
//! accumulate whole ticks of `tick_ms`, so they are exact and reproducible.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Default tick length in milliseconds.
pub const DEFAULT_TICK_MS: u32 = 64;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Milliseconds one tick represents.  Default: 64.
    pub tick_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_ms: u32) -> Self {
        Self { tick_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_ms as u64
    }

    /// Length of one tick in seconds, for kinematic integration.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per tick.  Default: 64.
    pub tick_ms: u32,

    /// Hard stop.  The run also ends early once every agent has terminated.
    pub max_ticks: u64,

    /// Master seed for sensor jitter.  The same seed always produces
    /// identical runs.
    pub seed: u64,

    /// Emit robot snapshots every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms:                 DEFAULT_TICK_MS,
            max_ticks:               100_000,
            seed:                    42,
            snapshot_interval_ticks: 16,
        }
    }
}

impl SimConfig {
    /// The tick at which the run is cut off (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Reject settings the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_ms == 0 {
            return Err(CoreError::Config("tick_ms must be greater than zero".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_ms)
    }
}
