//! Plain data row types written by trace writers.

use cafe_agent::AgentSnapshot;
use cafe_core::{Money, Tick};

/// One robot at one snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSnapshotRow {
    pub tick:        u64,
    pub agent_id:    u8,
    pub role:        &'static str,
    pub mode:        &'static str,
    pub phase:       &'static str,
    pub x:           f64,
    pub z:           f64,
    pub heading_deg: f64,
    pub balance:     Money,
}

impl RobotSnapshotRow {
    pub fn from_snapshot(tick: Tick, snap: &AgentSnapshot) -> Self {
        Self {
            tick:        tick.0,
            agent_id:    snap.id.0,
            role:        snap.role.as_str(),
            mode:        snap.mode.as_str(),
            phase:       snap.phase,
            x:           snap.position.x,
            z:           snap.position.z,
            heading_deg: snap.heading_deg,
            balance:     snap.balance,
        }
    }
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub elapsed_ms:         u64,
    pub messages_delivered: u64,
}
