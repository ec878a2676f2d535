//! `cafe-core` — foundational types for the café robot workspace.
//!
//! This crate is a dependency of every other `cafe-*` crate.  It has no
//! `cafe-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `OrderNo`                                  |
//! | [`geo`]         | `Point`, degree normalisation, wrapped angle error    |
//! | [`money`]       | `Money` — exact fixed-point currency (cents)          |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SensorRng` (per-robot sensor jitter)                 |
//! | [`role`]        | `Role` enum                                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod money;
pub mod rng;
pub mod role;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Point, angular_error_deg, normalize_deg};
pub use ids::{AgentId, OrderNo};
pub use money::Money;
pub use rng::SensorRng;
pub use role::Role;
pub use time::{SimClock, SimConfig, Tick};
