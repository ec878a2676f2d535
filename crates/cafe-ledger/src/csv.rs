//! CSV-backed record stores.
//!
//! # CSV formats
//!
//! ```csv
//! robot,balance
//! 1,10.00
//! 5,100.00
//! ```
//!
//! ```csv
//! item,prep_time_secs,price
//! Coffee,5,3.50
//! ```
//!
//! ```csv
//! customer,item
//! 1,Coffee
//! ```
//!
//! Money columns are read as text and parsed exactly (see
//! [`cafe_core::Money`]); floating point never touches a balance.

use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use cafe_core::{AgentId, Money};

use crate::{AccountRow, LedgerError, LedgerResult, MemoryStore, MenuItem, OrderLine, RecordStore};

pub const STARTING_FILE: &str = "Starting.csv";
pub const MENU_FILE:     &str = "Menu.csv";
pub const ORDER_FILE:    &str = "Order.csv";
pub const ACCOUNT_FILE:  &str = "Account.csv";

/// Header of the staff account log.
pub const ACCOUNT_HEADER: [&str; 4] = ["Order", "Item", "Customer", "Account Balance ($)"];

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BalanceRecord {
    robot:   u8,
    balance: String,
}

#[derive(Deserialize)]
struct MenuRecord {
    item:           String,
    prep_time_secs: u32,
    price:          String,
}

#[derive(Deserialize)]
struct OrderRecord {
    customer: u8,
    item:     String,
}

// ── Loaders ───────────────────────────────────────────────────────────────────

fn reader<R: Read>(source: R) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(source)
}

fn open(path: &Path) -> LedgerResult<File> {
    File::open(path).map_err(|source| LedgerError::Unavailable { path: path.to_path_buf(), source })
}

fn parse_money(text: &str) -> LedgerResult<Money> {
    text.parse::<Money>().map_err(|e| LedgerError::Parse(e.to_string()))
}

/// Load `robot,balance` rows from a file.
pub fn load_balances_csv(path: &Path) -> LedgerResult<BTreeMap<AgentId, Money>> {
    load_balances_reader(open(path)?)
}

/// Like [`load_balances_csv`] but accepts any `Read` source.
pub fn load_balances_reader<R: Read>(source: R) -> LedgerResult<BTreeMap<AgentId, Money>> {
    let mut balances = BTreeMap::new();
    for row in reader(source).deserialize::<BalanceRecord>() {
        let row = row.map_err(|e| LedgerError::Parse(e.to_string()))?;
        balances.insert(AgentId(row.robot), parse_money(&row.balance)?);
    }
    Ok(balances)
}

/// Load `item,prep_time_secs,price` rows from a file.
pub fn load_menu_csv(path: &Path) -> LedgerResult<Vec<MenuItem>> {
    load_menu_reader(open(path)?)
}

/// Like [`load_menu_csv`] but accepts any `Read` source.
pub fn load_menu_reader<R: Read>(source: R) -> LedgerResult<Vec<MenuItem>> {
    reader(source)
        .deserialize::<MenuRecord>()
        .map(|row| {
            let row = row.map_err(|e| LedgerError::Parse(e.to_string()))?;
            Ok(MenuItem::new(row.item, row.prep_time_secs, parse_money(&row.price)?))
        })
        .collect()
}

/// Load `customer,item` rows from a file, in file order.
pub fn load_orders_csv(path: &Path) -> LedgerResult<VecDeque<OrderLine>> {
    load_orders_reader(open(path)?)
}

/// Like [`load_orders_csv`] but accepts any `Read` source.
pub fn load_orders_reader<R: Read>(source: R) -> LedgerResult<VecDeque<OrderLine>> {
    reader(source)
        .deserialize::<OrderRecord>()
        .map(|row| {
            let row = row.map_err(|e| LedgerError::Parse(e.to_string()))?;
            Ok(OrderLine { customer: AgentId(row.customer), item: row.item })
        })
        .collect()
}

// ── AccountLog ────────────────────────────────────────────────────────────────

/// Append-only account log.  Writes the header on creation.
pub struct AccountLog<W: Write> {
    writer: ::csv::Writer<W>,
}

impl<W: Write> AccountLog<W> {
    pub fn new(sink: W) -> LedgerResult<Self> {
        let mut writer = ::csv::Writer::from_writer(sink);
        writer.write_record(ACCOUNT_HEADER)?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, row: &AccountRow) -> LedgerResult<()> {
        self.writer.write_record(row.to_record())?;
        Ok(())
    }

    pub fn flush(&mut self) -> LedgerResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(self) -> LedgerResult<W> {
        self.writer.into_inner().map_err(|e| LedgerError::Io(e.into_error()))
    }
}

impl AccountLog<File> {
    /// Create (truncating) the log file at `path`.
    pub fn create(path: &Path) -> LedgerResult<Self> {
        let file = File::create(path)
            .map_err(|source| LedgerError::Unavailable { path: path.to_path_buf(), source })?;
        Self::new(file)
    }
}

// ── CsvStore ──────────────────────────────────────────────────────────────────

/// A [`RecordStore`] loaded from the café's CSV files.
///
/// Each role opens only the files it needs.  Tables are read into memory
/// once; the account log is written through as rows arrive.
pub struct CsvStore {
    dir:     PathBuf,
    tables:  MemoryStore,
    account: Option<AccountLog<File>>,
}

impl CsvStore {
    /// Starting balances only.
    pub fn for_customer(dir: &Path) -> LedgerResult<Self> {
        let mut tables = MemoryStore::new();
        tables.set_balances(load_balances_csv(&dir.join(STARTING_FILE))?);
        Ok(Self::from_parts(dir, tables, None))
    }

    /// Starting balances and the menu; truncates and opens the account log.
    pub fn for_staff(dir: &Path) -> LedgerResult<Self> {
        let mut tables = MemoryStore::new();
        tables.set_balances(load_balances_csv(&dir.join(STARTING_FILE))?);
        tables.set_menu(load_menu_csv(&dir.join(MENU_FILE))?);
        let account = AccountLog::create(&dir.join(ACCOUNT_FILE))?;
        info!(path = %dir.join(ACCOUNT_FILE).display(), "account log opened");
        Ok(Self::from_parts(dir, tables, Some(account)))
    }

    /// The order dispatch list.
    pub fn for_director(dir: &Path) -> LedgerResult<Self> {
        let mut tables = MemoryStore::new();
        tables.set_orders(load_orders_csv(&dir.join(ORDER_FILE))?);
        Ok(Self::from_parts(dir, tables, None))
    }

    fn from_parts(dir: &Path, tables: MemoryStore, account: Option<AccountLog<File>>) -> Self {
        Self { dir: dir.to_path_buf(), tables, account }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for CsvStore {
    fn balance(&self, agent: AgentId) -> LedgerResult<Money> {
        self.tables.balance(agent)
    }

    fn set_balance(&mut self, agent: AgentId, balance: Money) {
        self.tables.set_balance(agent, balance);
    }

    fn menu_item(&self, name: &str) -> LedgerResult<MenuItem> {
        self.tables.menu_item(name)
    }

    fn next_order(&mut self) -> Option<OrderLine> {
        self.tables.next_order()
    }

    fn append_account(&mut self, row: &AccountRow) -> LedgerResult<()> {
        let Some(log) = self.account.as_mut() else {
            return Err(LedgerError::Unavailable {
                path:   self.dir.join(ACCOUNT_FILE),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "account log not opened for this role"),
            });
        };
        debug!(order = row.order.0, item = %row.item, balance = %row.balance, "account row");
        log.append(row)?;
        self.tables.append_account(row)
    }

    fn flush(&mut self) -> LedgerResult<()> {
        match self.account.as_mut() {
            Some(log) => log.flush(),
            None => Ok(()),
        }
    }
}
