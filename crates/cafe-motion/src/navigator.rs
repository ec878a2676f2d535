//! Waypoint navigator: a four-stage sub-machine driven once per tick.
//!
//! ```text
//! Idle ──► Facing ──► Translating ──► FinalTurn ──► Finished
//!           turn to     forward at      turn to       halted;
//!           bearing     max speed       start+offset  stays here
//! ```
//!
//! The owning agent resets the navigator to `Idle` before each new goal.
//!
//! # Steering quirks kept on purpose
//!
//! * The turn direction is chosen by which half of the compass the *target*
//!   heading lies in (`[90, 270]` turns right, otherwise left), not by the
//!   shorter way round.  Some turns are therefore longer than necessary.
//! * Turning speed is flat: maximum until the error drops below 4°, then a
//!   fixed 1 % creep.  There is no proportional term.
//!
//! Heading comparisons use the wrapped error ([`angular_error_deg`]) so a
//! target near 0° is still reachable while turning left.

use std::f64::consts::PI;

use cafe_core::{Point, angular_error_deg, normalize_deg};
use tracing::debug;

use crate::{MotionDriver, Pose, WheelActuator};

/// Per-axis arrival window, metres.
pub const POSITION_TOLERANCE: f64 = 0.01;

/// Heading window, degrees.
pub const BEARING_TOLERANCE: f64 = 0.05;

/// Below this heading error, turns slow to a creep.
pub const CREEP_THRESHOLD_DEG: f64 = 4.0;

/// Creep speed as a fraction of max.
pub const CREEP_FRACTION: f64 = 0.01;

/// Navigator stage.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigatorState {
    #[default]
    Idle,
    Facing,
    Translating,
    FinalTurn,
    Finished,
}

impl NavigatorState {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigatorState::Idle        => "idle",
            NavigatorState::Facing      => "facing",
            NavigatorState::Translating => "translating",
            NavigatorState::FinalTurn   => "final_turn",
            NavigatorState::Finished    => "finished",
        }
    }
}

/// Where to go and which way to face once there.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationGoal {
    pub target:             Point,
    /// Final heading, relative to the robot's recorded start heading.
    pub heading_offset_rad: f64,
}

impl NavigationGoal {
    pub const fn new(target: Point, heading_offset_rad: f64) -> Self {
        Self { target, heading_offset_rad }
    }
}

/// How the heading toward a target point is computed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BearingRule {
    /// `|atan2(dz, dx)| + 180`.  The absolute value folds targets with
    /// `dz < 0` onto their mirror image, so only targets with `dz >= 0` are
    /// faced correctly.
    Mirrored,
    /// `atan2(dz, dx) + 180`, wrapped into `[0, 360)`.  Agrees with
    /// `Mirrored` whenever `dz >= 0` (except `-x`, where 360 becomes 0).
    #[default]
    Signed,
}

/// Which way to pivot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Turn {
    Left,
    Right,
}

/// Heading (degrees) a robot at `from` must face to drive straight at `to`.
pub fn bearing_to(from: Point, to: Point, rule: BearingRule) -> f64 {
    let raw = (to.z - from.z).atan2(to.x - from.x);
    match rule {
        BearingRule::Mirrored => raw.abs() * 180.0 / PI + 180.0,
        BearingRule::Signed => normalize_deg(raw.to_degrees() + 180.0),
    }
}

/// Hemispherical turn rule: `[90, 270]` turns right, anything else left.
pub fn turn_direction(target_deg: f64) -> Turn {
    if (90.0..=270.0).contains(&target_deg) { Turn::Right } else { Turn::Left }
}

/// Flat speed law: creep below [`CREEP_THRESHOLD_DEG`], otherwise full speed.
pub fn speed_for(delta_deg: f64, max_speed: f64) -> f64 {
    if delta_deg < CREEP_THRESHOLD_DEG { CREEP_FRACTION * max_speed } else { max_speed }
}

/// Drives one robot toward one goal at a time.
#[derive(Clone, Debug)]
pub struct Navigator {
    state:         NavigatorState,
    start_heading: f64,
    rule:          BearingRule,
}

impl Navigator {
    pub fn new(start_heading: f64, rule: BearingRule) -> Self {
        Self { state: NavigatorState::Idle, start_heading: normalize_deg(start_heading), rule }
    }

    #[inline]
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    #[inline]
    pub fn rule(&self) -> BearingRule {
        self.rule
    }

    #[inline]
    pub fn start_heading(&self) -> f64 {
        self.start_heading
    }

    /// Record the heading that final-turn offsets are relative to.
    pub fn set_start_heading(&mut self, heading_deg: f64) {
        self.start_heading = normalize_deg(heading_deg);
    }

    /// Forget the current goal.
    pub fn reset(&mut self) {
        self.state = NavigatorState::Idle;
    }

    /// Absolute final heading for `goal`, degrees in `[0, 360)`.
    pub fn final_heading(&self, goal: &NavigationGoal) -> f64 {
        normalize_deg(self.start_heading + goal.heading_offset_rad.to_degrees())
    }

    /// Advance one tick toward `goal` using the freshly sampled `pose`.
    ///
    /// Records an intent on `driver` and commits it to `actuator` exactly
    /// once.  Ticks that change stage halt the wheels.
    pub fn advance<A: WheelActuator + ?Sized>(
        &mut self,
        goal:     &NavigationGoal,
        pose:     &Pose,
        driver:   &mut MotionDriver,
        actuator: &mut A,
    ) -> NavigatorState {
        let next = match self.state {
            NavigatorState::Idle => NavigatorState::Facing,

            NavigatorState::Facing => {
                let bearing = bearing_to(pose.position, goal.target, self.rule);
                if self.steer(bearing, pose, driver) {
                    NavigatorState::Translating
                } else {
                    NavigatorState::Facing
                }
            }

            NavigatorState::Translating => {
                if pose.position.within(goal.target, POSITION_TOLERANCE) {
                    NavigatorState::FinalTurn
                } else {
                    driver.forward(driver.max_speed());
                    NavigatorState::Translating
                }
            }

            NavigatorState::FinalTurn => {
                let heading = self.final_heading(goal);
                if self.steer(heading, pose, driver) {
                    NavigatorState::Finished
                } else {
                    NavigatorState::FinalTurn
                }
            }

            NavigatorState::Finished => {
                driver.halt();
                NavigatorState::Finished
            }
        };

        if next != self.state {
            debug!(from = self.state.as_str(), to = next.as_str(), at = %pose.position, "navigator");
            driver.halt();
            self.state = next;
        }
        driver.commit(actuator);
        self.state
    }

    /// Turn toward `target_deg`.  Returns `true` once inside the window.
    fn steer(&self, target_deg: f64, pose: &Pose, driver: &mut MotionDriver) -> bool {
        let delta = angular_error_deg(pose.heading_deg, target_deg);
        if delta < BEARING_TOLERANCE {
            return true;
        }
        let speed = speed_for(delta, driver.max_speed());
        match turn_direction(target_deg) {
            Turn::Right => driver.turn_right(speed),
            Turn::Left  => driver.turn_left(speed),
        }
        false
    }
}
