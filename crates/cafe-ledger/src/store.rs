//! The record-store contract and its in-memory implementation.

use std::collections::{BTreeMap, VecDeque};
use std::io::Read;

use cafe_core::{AgentId, Money};

use crate::{AccountRow, LedgerError, LedgerResult, MenuItem, OrderLine};

/// Keyed tables an agent reads and writes.
///
/// Every agent owns its own store; nothing here is shared between agents.
pub trait RecordStore {
    /// Starting (or current) balance of `agent`.
    fn balance(&self, agent: AgentId) -> LedgerResult<Money>;

    fn set_balance(&mut self, agent: AgentId, balance: Money);

    /// Menu line for `name`; [`LedgerError::RecordNotFound`] on a miss.
    fn menu_item(&self, name: &str) -> LedgerResult<MenuItem>;

    /// Next order to dispatch, or `None` once the source is exhausted.
    fn next_order(&mut self) -> Option<OrderLine>;

    /// Append one row to the account log.
    fn append_account(&mut self, row: &AccountRow) -> LedgerResult<()>;

    /// Push buffered writes to their destination.
    fn flush(&mut self) -> LedgerResult<()> {
        Ok(())
    }
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn balance(&self, agent: AgentId) -> LedgerResult<Money> {
        (**self).balance(agent)
    }

    fn set_balance(&mut self, agent: AgentId, balance: Money) {
        (**self).set_balance(agent, balance)
    }

    fn menu_item(&self, name: &str) -> LedgerResult<MenuItem> {
        (**self).menu_item(name)
    }

    fn next_order(&mut self) -> Option<OrderLine> {
        (**self).next_order()
    }

    fn append_account(&mut self, row: &AccountRow) -> LedgerResult<()> {
        (**self).append_account(row)
    }

    fn flush(&mut self) -> LedgerResult<()> {
        (**self).flush()
    }
}

/// Store held entirely in memory.  The account log is kept as a `Vec`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    balances: BTreeMap<AgentId, Money>,
    menu:     BTreeMap<String, MenuItem>,
    orders:   VecDeque<OrderLine>,
    account:  Vec<AccountRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from CSV sources.  Pass an empty reader for tables a role does
    /// not use.
    pub fn from_readers<B: Read, M: Read, O: Read>(balances: B, menu: M, orders: O) -> LedgerResult<Self> {
        let mut store = MemoryStore {
            balances: crate::load_balances_reader(balances)?,
            orders:   crate::load_orders_reader(orders)?,
            ..Self::default()
        };
        for item in crate::load_menu_reader(menu)? {
            store.menu.insert(item.name.clone(), item);
        }
        Ok(store)
    }

    pub fn with_balance(mut self, agent: AgentId, balance: Money) -> Self {
        self.balances.insert(agent, balance);
        self
    }

    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu.insert(item.name.clone(), item);
        self
    }

    pub fn with_order(mut self, customer: AgentId, item: impl Into<String>) -> Self {
        self.orders.push_back(OrderLine { customer, item: item.into() });
        self
    }

    pub(crate) fn set_balances(&mut self, balances: BTreeMap<AgentId, Money>) {
        self.balances = balances;
    }

    pub(crate) fn set_menu(&mut self, items: Vec<MenuItem>) {
        self.menu = items.into_iter().map(|m| (m.name.clone(), m)).collect();
    }

    pub(crate) fn set_orders(&mut self, orders: VecDeque<OrderLine>) {
        self.orders = orders;
    }

    /// Rows appended so far.
    pub fn account(&self) -> &[AccountRow] {
        &self.account
    }

    /// Orders not yet dispatched.
    pub fn remaining_orders(&self) -> usize {
        self.orders.len()
    }
}

impl RecordStore for MemoryStore {
    fn balance(&self, agent: AgentId) -> LedgerResult<Money> {
        self.balances
            .get(&agent)
            .copied()
            .ok_or_else(|| LedgerError::RecordNotFound(format!("starting balance for {agent}")))
    }

    fn set_balance(&mut self, agent: AgentId, balance: Money) {
        self.balances.insert(agent, balance);
    }

    fn menu_item(&self, name: &str) -> LedgerResult<MenuItem> {
        self.menu
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::RecordNotFound(format!("menu item {name:?}")))
    }

    fn next_order(&mut self) -> Option<OrderLine> {
        self.orders.pop_front()
    }

    fn append_account(&mut self, row: &AccountRow) -> LedgerResult<()> {
        self.account.push(row.clone());
        Ok(())
    }
}
