//! `cafe-sim` — tick loop orchestrator for the café robots.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.max_ticks (or until everyone terminates):
//!   ① World     — integrate wheel commands, draw sensor noise.
//!   ② Director  — handle this tick's key, dispatch the next order.
//!   ③ Robots    — ascending AgentId: sense → one message → act.
//!   ④ Radio     — flush; messages sent this tick arrive next tick.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cafe_core::{AgentId, SimConfig};
//! use cafe_ledger::CsvStore;
//! use cafe_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .director(CsvStore::for_director(dir)?)
//!     .staff(None, CsvStore::for_staff(dir)?)
//!     .customer(AgentId(1), None, CsvStore::for_customer(dir)?)
//!     .keys("0:a".parse()?)
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod keys;
pub mod observer;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use keys::KeyScript;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim};
pub use world::{Body, World, WorldConfig, default_home};
