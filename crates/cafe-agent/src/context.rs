//! Per-robot state threaded through every transition.
//!
//! Transitions take an `AgentContext` by value and return the next one.  The
//! robot only commits the returned context when the transition succeeds, so a
//! failed transition leaves the previous state untouched.

use std::fmt::Debug;

use cafe_core::{AgentId, Money, OrderNo};

use crate::AgentMode;

/// A role's ordering sub-state.
pub trait Phase: Copy + Eq + Debug + Default {
    fn as_str(self) -> &'static str;
}

/// The order a robot is currently working on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub item:            String,
    pub customer:        AgentId,
    /// Set once staff quotes a price.
    pub price:           Option<Money>,
    /// Staff found the item on the menu.
    pub available:       bool,
    pub paid:            bool,
    /// Staff has put the order on the pickup counter.
    pub ready:           bool,
    pub prep_time_ms:    u64,
    pub prep_elapsed_ms: u64,
}

impl Order {
    pub fn new(item: impl Into<String>, customer: AgentId) -> Self {
        Self {
            item:            item.into(),
            customer,
            price:           None,
            available:       false,
            paid:            false,
            ready:           false,
            prep_time_ms:    0,
            prep_elapsed_ms: 0,
        }
    }
}

/// Everything a robot's state machine knows about itself.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentContext<P> {
    pub id:        AgentId,
    pub mode:      AgentMode,
    pub phase:     P,
    pub balance:   Money,
    pub order:     Option<Order>,
    /// Sales recorded so far (staff only).
    pub order_seq: OrderNo,
}

impl<P: Phase> AgentContext<P> {
    pub fn new(id: AgentId, balance: Money) -> Self {
        Self {
            id,
            mode: AgentMode::Idle,
            phase: P::default(),
            balance,
            order: None,
            order_seq: OrderNo::OPENING,
        }
    }

    /// Same context in another phase.
    pub fn with_phase(mut self, phase: P) -> Self {
        self.phase = phase;
        self
    }
}
