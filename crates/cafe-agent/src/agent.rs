//! The object-safe face every robot shows the simulation loop.

use cafe_core::{AgentId, Money, Point, Role};
use cafe_motion::Hardware;
use cafe_radio::{ChannelId, Radio};

use crate::{AgentMode, Key};

/// Outcome of one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentStatus {
    Running,
    /// The agent has stopped for good; further ticks do nothing.
    Terminated,
}

/// Read-only view of an agent at the end of a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentSnapshot {
    pub id:          AgentId,
    pub role:        Role,
    pub mode:        AgentMode,
    pub phase:       &'static str,
    pub position:    Point,
    pub heading_deg: f64,
    pub balance:     Money,
}

/// A robot as the simulation loop sees it.
pub trait Agent {
    fn id(&self) -> AgentId;

    fn role(&self) -> Role;

    fn channel(&self) -> ChannelId {
        ChannelId::from(self.id())
    }

    fn status(&self) -> AgentStatus;

    /// Run one control step: sample sensors, take at most one message,
    /// dispatch on mode, command the wheels.
    fn tick(&mut self, hw: &mut dyn Hardware, key: Option<Key>, radio: &mut dyn Radio) -> AgentStatus;

    fn snapshot(&self) -> AgentSnapshot;
}
