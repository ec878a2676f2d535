//! Simulation observer trait for progress reporting and data collection.

use cafe_agent::AgentSnapshot;
use cafe_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after the radio flush.
    ///
    /// `delivered` is the number of mailbox deliveries made by the flush.
    fn on_tick_end(&mut self, _tick: Tick, _delivered: usize) {}

    /// Called every `config.snapshot_interval_ticks` ticks with one snapshot
    /// per robot, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _robots: &[AgentSnapshot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
