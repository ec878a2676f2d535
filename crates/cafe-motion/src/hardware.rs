//! Device seams between the control core and whatever moves the robot.
//!
//! The simulated world in `cafe-sim` implements these for its bodies; tests
//! implement them with small recording fakes.

/// Applies signed angular velocities (rad/s) to the two drive wheels.
pub trait WheelActuator {
    fn set_wheel_velocities(&mut self, left: f64, right: f64);
}

/// Raw three-axis sensor vectors.  Only the horizontal axes (0 and 2) carry
/// information the control core uses.
pub trait PoseSensors {
    /// Vector pointing to magnetic north in the robot's frame.
    fn compass(&self) -> [f64; 3];

    /// World-frame position in metres.
    fn gps(&self) -> [f64; 3];
}

/// A complete differential-drive robot.
pub trait Hardware: PoseSensors + WheelActuator {
    /// Largest angular velocity either wheel accepts.
    fn max_wheel_speed(&self) -> f64;
}
