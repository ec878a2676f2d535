//! Motion primitives for a two-wheel differential drive.
//!
//! Each primitive records an intent: a direction per wheel plus one shared
//! magnitude.  Nothing reaches the motors until [`MotionDriver::commit`].

use tracing::trace;

use crate::{MotionError, MotionResult, WheelActuator};

/// Fraction of max speed added or removed by one speed adjustment.
pub const SPEED_STEP_FRACTION: f64 = 0.1;

/// Fraction of max speed used for manual driving.
pub const DEFAULT_SPEED_FRACTION: f64 = 0.5;

/// Signed wheel velocities ready to hand to an actuator.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct WheelCommand {
    pub left:  f64,
    pub right: f64,
}

impl WheelCommand {
    pub const STOP: WheelCommand = WheelCommand { left: 0.0, right: 0.0 };

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }
}

/// Holds the current motion intent of one robot.
#[derive(Clone, Debug)]
pub struct MotionDriver {
    max_speed:     f64,
    step:          f64,
    default_speed: f64,
    left_dir:      f64,
    right_dir:     f64,
    magnitude:     f64,
}

impl MotionDriver {
    /// A halted driver for wheels that accept at most `max_speed` rad/s.
    pub fn new(max_speed: f64) -> MotionResult<Self> {
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(MotionError::InvalidMaxSpeed(max_speed));
        }
        Ok(Self {
            max_speed,
            step:          SPEED_STEP_FRACTION * max_speed,
            default_speed: DEFAULT_SPEED_FRACTION * max_speed,
            left_dir:      1.0,
            right_dir:     1.0,
            magnitude:     0.0,
        })
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Speed used by manual (remote) driving.
    #[inline]
    pub fn default_speed(&self) -> f64 {
        self.default_speed
    }

    /// Current shared wheel magnitude.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.magnitude
    }

    // ── Primitives ────────────────────────────────────────────────────────

    pub fn halt(&mut self) {
        self.magnitude = 0.0;
    }

    pub fn forward(&mut self, speed: f64) {
        self.set(1.0, 1.0, speed);
    }

    pub fn backward(&mut self, speed: f64) {
        self.set(-1.0, -1.0, speed);
    }

    /// Pivot counter-clockwise in place.
    pub fn turn_left(&mut self, speed: f64) {
        self.set(-1.0, 1.0, speed);
    }

    /// Pivot clockwise in place.
    pub fn turn_right(&mut self, speed: f64) {
        self.set(1.0, -1.0, speed);
    }

    /// Raise both wheels by one step, capped at max speed.
    pub fn increment_speed(&mut self) {
        self.magnitude = (self.magnitude + self.step).min(self.max_speed);
    }

    /// Lower both wheels by one step, floored at zero.
    pub fn decrement_speed(&mut self) {
        self.magnitude = (self.magnitude - self.step).max(0.0);
    }

    // ── Actuation ─────────────────────────────────────────────────────────

    /// The signed wheel pair the current intent resolves to.
    pub fn command(&self) -> WheelCommand {
        WheelCommand {
            left:  self.left_dir * self.magnitude,
            right: self.right_dir * self.magnitude,
        }
    }

    /// Apply the current intent to the wheels.
    pub fn commit<A: WheelActuator + ?Sized>(&self, actuator: &mut A) -> WheelCommand {
        let cmd = self.command();
        trace!(left = cmd.left, right = cmd.right, "commit wheels");
        actuator.set_wheel_velocities(cmd.left, cmd.right);
        cmd
    }

    fn set(&mut self, left_dir: f64, right_dir: f64, speed: f64) {
        self.left_dir  = left_dir;
        self.right_dir = right_dir;
        self.magnitude = speed.clamp(0.0, self.max_speed);
    }
}
