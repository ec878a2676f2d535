//! Ledger row types.

use cafe_core::{AgentId, Money, OrderNo};

/// One line of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MenuItem {
    pub name:           String,
    pub prep_time_secs: u32,
    pub price:          Money,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, prep_time_secs: u32, price: Money) -> Self {
        Self { name: name.into(), prep_time_secs, price }
    }

    #[inline]
    pub fn prep_time_ms(&self) -> u64 {
        self.prep_time_secs as u64 * 1000
    }
}

/// One order the director dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderLine {
    pub customer: AgentId,
    pub item:     String,
}

/// One row of the staff account log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccountRow {
    pub order:    OrderNo,
    pub item:     String,
    /// `None` only on the opening row.
    pub customer: Option<AgentId>,
    /// Running balance after this sale.
    pub balance:  Money,
}

impl AccountRow {
    /// The `0,,,<balance>` row written before any sale.
    pub fn opening(balance: Money) -> Self {
        Self { order: OrderNo::OPENING, item: String::new(), customer: None, balance }
    }

    /// Columns in file order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.order.0.to_string(),
            self.item.clone(),
            self.customer.map(|c| c.0.to_string()).unwrap_or_default(),
            self.balance.to_string(),
        ]
    }
}
