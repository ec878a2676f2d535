//! Where the counters are.

use std::f64::consts::{FRAC_PI_2, PI};

use cafe_core::Point;
use cafe_motion::{BearingRule, NavigationGoal};

/// A counter position plus the heading to hold there, relative to the
/// robot's start heading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub x:                  f64,
    pub z:                  f64,
    pub heading_offset_rad: f64,
}

impl Waypoint {
    pub const fn new(x: f64, z: f64, heading_offset_rad: f64) -> Self {
        Self { x, z, heading_offset_rad }
    }

    pub fn goal(&self) -> NavigationGoal {
        NavigationGoal::new(Point::new(self.x, self.z), self.heading_offset_rad)
    }
}

/// Counter waypoints for both robot roles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CafeLayout {
    pub customer_order_counter:  Waypoint,
    pub customer_pickup_counter: Waypoint,
    pub staff_order_station:     Waypoint,
    pub staff_pickup_station:    Waypoint,
    pub bearing_rule:            BearingRule,
}

impl Default for CafeLayout {
    fn default() -> Self {
        Self {
            customer_order_counter:  Waypoint::new(0.375, 0.375, -FRAC_PI_2),
            customer_pickup_counter: Waypoint::new(0.375, -0.375, PI),
            staff_order_station:     Waypoint::new(0.625, 0.375, FRAC_PI_2),
            staff_pickup_station:    Waypoint::new(0.625, -0.375, FRAC_PI_2),
            bearing_rule:            BearingRule::default(),
        }
    }
}
