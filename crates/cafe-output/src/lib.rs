//! `cafe-output` — run traces for café simulations.
//!
//! | File                  | Columns                                                           |
//! |-----------------------|-------------------------------------------------------------------|
//! | `robot_snapshots.csv` | `tick,agent_id,role,mode,phase,x,z,heading_deg,balance`           |
//! | `tick_summaries.csv`  | `tick,elapsed_ms,messages_delivered`                              |
//!
//! [`CsvTraceWriter`] implements [`TraceWriter`] and is driven by
//! [`TraceObserver`], which implements `cafe_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cafe_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("trace error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{RobotSnapshotRow, TickSummaryRow};
pub use writer::TraceWriter;
