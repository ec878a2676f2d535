//! `cafe-motion` — turning sensor readings into wheel commands.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`hardware`]  | `WheelActuator`, `PoseSensors`, `Hardware` device seams         |
//! | [`pose`]      | `Pose` — heading + planar position sampled each tick            |
//! | [`drive`]     | `MotionDriver` — motion intents, committed once per tick        |
//! | [`navigator`] | `Navigator` — face → translate → final turn → finished          |
//! | [`error`]     | `MotionError`, `MotionResult<T>`                                |
//!
//! # Control loop
//!
//! Every tick the owning agent:
//!
//! 1. samples a fresh [`Pose`] from its [`PoseSensors`] (no caching);
//! 2. calls [`Navigator::advance`] with the current [`NavigationGoal`], which
//!    records a motion intent on the [`MotionDriver`];
//! 3. the intent is committed to the [`WheelActuator`] exactly once.
//!
//! Intents are plain data until committed, so decision logic can be tested
//! without any device behind it.

pub mod drive;
pub mod error;
pub mod hardware;
pub mod navigator;
pub mod pose;

#[cfg(test)]
mod tests;

pub use drive::{MotionDriver, WheelCommand};
pub use error::{MotionError, MotionResult};
pub use hardware::{Hardware, PoseSensors, WheelActuator};
pub use navigator::{BearingRule, NavigationGoal, Navigator, NavigatorState, Turn};
pub use pose::{Pose, heading_from_compass};
