//! `cafe-agent` — the per-role state machines of the café.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`mode`]     | `AgentMode` (`Idle`, `Remote`, `Auto`, `Terminated`)             |
//! | [`context`]  | `AgentContext<P>`, `Order`, the `Phase` trait                    |
//! | [`input`]    | `Key`, `RemoteCommand`, shared keymap                            |
//! | [`layout`]   | `CafeLayout` counter waypoints                                   |
//! | [`role`]     | `RoleBehavior` trait, `RoleIo` per-tick handles                  |
//! | [`customer`] | `Customer` role and `CustomerPhase`                              |
//! | [`staff`]    | `Staff` role and `StaffPhase`                                    |
//! | [`robot`]    | `Robot<R, S>`: the shared tick for every mobile role             |
//! | [`agent`]    | `Agent` trait, `AgentStatus`, `AgentSnapshot`                    |
//! | [`director`] | `Director<S>` and `DirectorPhase`                                |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                                   |
//!
//! # Tick shape
//!
//! Every robot tick is: sample pose → take at most one radio message →
//! interpret it → dispatch on mode.  Mode changes, `?` and `~` are handled by
//! [`Robot`]; the remaining payloads and the whole `Auto` protocol belong to
//! the role.  Transitions take the [`AgentContext`] by value and return the
//! next one, so a failed transition leaves the robot where it was.

pub mod agent;
pub mod context;
pub mod customer;
pub mod director;
pub mod error;
pub mod input;
pub mod layout;
pub mod mode;
pub mod robot;
pub mod role;
pub mod staff;


pub use agent::{Agent, AgentSnapshot, AgentStatus};
pub use context::{AgentContext, Order, Phase};
pub use customer::{Customer, CustomerPhase};
pub use director::{Director, DirectorPhase};
pub use error::{AgentError, AgentResult};
pub use input::{Key, RemoteCommand, common_command};
pub use layout::{CafeLayout, Waypoint};
pub use mode::AgentMode;
pub use robot::Robot;
pub use role::{RoleBehavior, RoleIo};
pub use staff::{Staff, StaffPhase};
