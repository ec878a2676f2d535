//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use cafe_agent::{Agent, CafeLayout, Customer, Director, Robot, Staff};
use cafe_core::{AgentId, Role, SimConfig};
use cafe_ledger::RecordStore;
use cafe_motion::Pose;
use cafe_radio::{ChannelId, RadioBus};
use tracing::info;

use crate::{KeyScript, Sim, SimError, SimResult, World, WorldConfig, default_home};

/// A robot waiting to be built.
struct PendingRobot {
    id:    AgentId,
    role:  Role,
    start: Pose,
    store: Box<dyn RecordStore>,
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, cut-off, seed and snapshot cadence
/// - a director store (`.director(store)`), the order source
/// - exactly one staff robot (`.staff(..)`)
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                    |
/// |------------------|----------------------------|
/// | `.world(w)`      | `WorldConfig::default()`   |
/// | `.layout(l)`     | `CafeLayout::default()`    |
/// | `.keys(k)`       | no keys pressed            |
/// | `.customer(..)`  | none                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .director(CsvStore::for_director(dir)?)
///     .staff(None, CsvStore::for_staff(dir)?)
///     .customer(AgentId(1), None, CsvStore::for_customer(dir)?)
///     .keys("0:a".parse()?)
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    world:    WorldConfig,
    layout:   CafeLayout,
    keys:     KeyScript,
    director: Option<Box<dyn RecordStore>>,
    robots:   Vec<PendingRobot>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            world:    WorldConfig::default(),
            layout:   CafeLayout::default(),
            keys:     KeyScript::default(),
            director: None,
            robots:   Vec::new(),
        }
    }

    pub fn world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    pub fn layout(mut self, layout: CafeLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn keys(mut self, keys: KeyScript) -> Self {
        self.keys = keys;
        self
    }

    /// The director's store; only its order source is used.
    pub fn director<S: RecordStore + 'static>(mut self, store: S) -> Self {
        self.director = Some(Box::new(store));
        self
    }

    /// Add a customer.  `start` defaults to [`default_home`].
    pub fn customer<S: RecordStore + 'static>(mut self, id: AgentId, start: Option<Pose>, store: S) -> Self {
        let start = start.unwrap_or_else(|| default_home(Role::Customer, id));
        self.robots.push(PendingRobot { id, role: Role::Customer, start, store: Box::new(store) });
        self
    }

    /// Add the staff robot (always [`AgentId::STAFF`]).
    pub fn staff<S: RecordStore + 'static>(mut self, start: Option<Pose>, store: S) -> Self {
        let id = AgentId::STAFF;
        let start = start.unwrap_or_else(|| default_home(Role::Staff, id));
        self.robots.push(PendingRobot { id, role: Role::Staff, start, store: Box::new(store) });
        self
    }

    /// Validate inputs, build every agent and register its radio channel.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;
        let director_store = self
            .director
            .ok_or_else(|| SimError::Config("no director store supplied".into()))?;

        // ── Validate the roster ───────────────────────────────────────────
        let mut seen = BTreeSet::new();
        for entry in &self.robots {
            let reserved = entry.id == AgentId::STAFF || ChannelId::from(entry.id) == ChannelId::DIRECTOR;
            if entry.role == Role::Customer && (entry.id.to_digit().is_none() || reserved) {
                return Err(SimError::InvalidCustomerId(entry.id));
            }
            if !seen.insert(entry.id) {
                return Err(SimError::DuplicateAgent(entry.id));
            }
        }
        let staff = self.robots.iter().filter(|s| s.role == Role::Staff).count();
        if staff != 1 {
            return Err(SimError::StaffCount(staff));
        }

        let mut pending = self.robots;
        pending.sort_by_key(|s| s.id);

        // ── Bodies, radio, agents ─────────────────────────────────────────
        let mut world = World::new(self.world, self.config.seed);
        let mut bus = RadioBus::new();
        bus.register(ChannelId::DIRECTOR)?;

        let max_speed = world.config().max_wheel_speed;
        let roster = pending.iter().map(|s| (s.id, s.role)).collect();
        let mut robots: Vec<Box<dyn Agent>> = Vec::with_capacity(pending.len());
        for entry in pending {
            world.spawn(entry.id, entry.start)?;
            bus.register(ChannelId::from(entry.id))?;
            let layout = self.layout.clone();
            let tick_ms = self.config.tick_ms;
            let robot: Box<dyn Agent> = match entry.role {
                Role::Staff => Box::new(Robot::new(Staff, entry.id, entry.store, layout, tick_ms, max_speed)?),
                _ => Box::new(Robot::new(Customer, entry.id, entry.store, layout, tick_ms, max_speed)?),
            };
            info!(agent = %entry.id, role = %entry.role, at = %entry.start.position, "robot ready");
            robots.push(robot);
        }

        Ok(Sim {
            clock:           self.config.make_clock(),
            config:          self.config,
            world,
            bus,
            keys:            self.keys,
            director:        Director::new(director_store).with_roster(roster),
            robots,
            delivered_total: 0,
        })
    }
}
