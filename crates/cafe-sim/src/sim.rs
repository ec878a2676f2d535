//! The `Sim` struct and its tick loop.

use cafe_agent::{Agent, AgentSnapshot, AgentStatus, Director, DirectorPhase};
use cafe_core::{AgentId, SimClock, SimConfig, Tick};
use cafe_ledger::RecordStore;
use cafe_radio::{ChannelId, RadioBus};
use tracing::{debug, info};

use crate::{KeyScript, SimError, SimObserver, SimResult, World};

/// What a finished run looked like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks:              u64,
    pub elapsed_ms:         u64,
    /// Mailbox deliveries over the whole run.
    pub messages_delivered: u64,
    /// Orders the director saw acknowledged.
    pub orders_completed:   u32,
    /// Every agent, director included, reached `Terminated`.
    pub all_terminated:     bool,
}

/// The main simulation runner.
///
/// Each tick runs in a fixed order:
///
/// 1. **World**: integrate last tick's wheel commands, refresh sensors.
/// 2. **Director**: react to this tick's key, advance dispatch.
/// 3. **Robots**: in ascending id order, each samples its pose, takes at
///    most one message and acts.
/// 4. **Radio**: deliver everything sent this tick; it is visible next tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (tick length, cut-off, seed, snapshot cadence).
    pub config: SimConfig,

    /// Simulation clock.
    pub clock: SimClock,

    /// Robot bodies.
    pub world: World,

    /// In-process radio shared by every agent.
    pub bus: RadioBus,

    /// Keyboard input, shared by the director and the robots.
    pub keys: KeyScript,

    pub(crate) director: Director<Box<dyn RecordStore>>,

    /// Mobile robots, ascending id.
    pub(crate) robots: Vec<Box<dyn Agent>>,

    pub(crate) delivered_total: u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every agent has terminated or `config.end_tick()` is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let started = self.clock.current_tick;
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() || self.all_terminated() {
                break;
            }
            self.step(now, observer)?;
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);

        let summary = self.summary(started);
        info!(
            ticks      = summary.ticks,
            elapsed_ms = summary.elapsed_ms,
            orders     = summary.orders_completed,
            terminated = summary.all_terminated,
            "run finished"
        );
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and termination).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.step(now, observer)?;
            self.clock.advance();
        }
        Ok(())
    }

    /// `true` once the director and every robot have terminated.
    pub fn all_terminated(&self) -> bool {
        self.director.status() == AgentStatus::Terminated
            && self.robots.iter().all(|r| r.status() == AgentStatus::Terminated)
    }

    pub fn director(&self) -> &Director<Box<dyn RecordStore>> {
        &self.director
    }

    pub fn director_phase(&self) -> DirectorPhase {
        self.director.phase()
    }

    pub fn robot(&self, id: AgentId) -> Option<&dyn Agent> {
        self.robots.iter().find(|r| r.id() == id).map(|r| &**r)
    }

    /// Current snapshot of every robot, ascending id.
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.robots.iter().map(|r| r.snapshot()).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);

        self.world.step(self.clock.tick_secs());
        let key = self.keys.key_at(now);
        if let Some(key) = key {
            debug!(tick = %now, ?key, "key");
        }

        {
            let mut port = self.bus.port(ChannelId::DIRECTOR)?;
            self.director.tick(key, &mut port);
        }

        for robot in self.robots.iter_mut() {
            let id = robot.id();
            let body = self.world.body_mut(id).ok_or(SimError::MissingBody(id))?;
            let mut port = self.bus.port(robot.channel())?;
            robot.tick(body, key, &mut port);
        }

        let delivered = self.bus.flush();
        self.delivered_total += delivered as u64;
        observer.on_tick_end(now, delivered);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.snapshots());
        }
        Ok(())
    }

    fn summary(&self, started: Tick) -> RunSummary {
        RunSummary {
            ticks:              self.clock.current_tick.since(started),
            elapsed_ms:         self.clock.elapsed_ms(),
            messages_delivered: self.delivered_total,
            orders_completed:   self.director.completed(),
            all_terminated:     self.all_terminated(),
        }
    }
}
