//! `cafe-ledger` — the record stores behind the café's money and menu.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`records`] | `MenuItem`, `OrderLine`, `AccountRow`                           |
//! | [`store`]   | `RecordStore` trait, `MemoryStore`                              |
//! | [`csv`]     | CSV loaders, `AccountLog`, `CsvStore`                           |
//! | [`error`]   | `LedgerError`, `LedgerResult<T>`                                |
//!
//! # Files
//!
//! | File           | Columns                                    | Used by   |
//! |----------------|--------------------------------------------|-----------|
//! | `Starting.csv` | `robot,balance`                            | robots    |
//! | `Menu.csv`     | `item,prep_time_secs,price`                | staff     |
//! | `Order.csv`    | `customer,item`                            | director  |
//! | `Account.csv`  | `Order,Item,Customer,Account Balance ($)`  | staff (written) |
//!
//! Stores are opened once at startup; a missing file is fatal
//! ([`LedgerError::Unavailable`]).  A menu miss is not an error for the
//! caller's control flow ([`LedgerError::RecordNotFound`] drives the
//! "item not found" reply).

pub mod csv;
pub mod error;
pub mod records;
pub mod store;


pub use crate::csv::{AccountLog, CsvStore, load_balances_csv, load_balances_reader, load_menu_csv,
                     load_menu_reader, load_orders_csv, load_orders_reader};
pub use error::{LedgerError, LedgerResult};
pub use records::{AccountRow, MenuItem, OrderLine};
pub use store::{MemoryStore, RecordStore};
