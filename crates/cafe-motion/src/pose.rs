//! Pose estimation from compass and GPS vectors.

use std::f64::consts::FRAC_PI_2;

use cafe_core::{Point, normalize_deg};

use crate::PoseSensors;

/// Where a robot is and which way it faces, for one tick only.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position:    Point,
    /// Degrees in `[0, 360)`.
    pub heading_deg: f64,
}

impl Pose {
    pub fn new(position: Point, heading_deg: f64) -> Self {
        Self { position, heading_deg: normalize_deg(heading_deg) }
    }

    /// Build a pose from raw readings.  GPS axis 1 (vertical) is ignored.
    pub fn from_readings(compass: [f64; 3], gps: [f64; 3]) -> Self {
        Self {
            position:    Point::new(gps[0], gps[2]),
            heading_deg: heading_from_compass(compass),
        }
    }

    /// Sample a fresh pose from the robot's sensors.
    pub fn from_sensors<S: PoseSensors + ?Sized>(sensors: &S) -> Self {
        Self::from_readings(sensors.compass(), sensors.gps())
    }
}

/// Heading in degrees `[0, 360)`: `atan2(c_z, c_x)` rotated by −90°.
pub fn heading_from_compass(compass: [f64; 3]) -> f64 {
    let rad = compass[2].atan2(compass[0]) - FRAC_PI_2;
    normalize_deg(rad.to_degrees())
}
