//! Unit tests for cafe-motion.

use std::f64::consts::{FRAC_PI_2, PI};

use cafe_core::{Point, angular_error_deg};

use crate::{
    BearingRule, MotionDriver, NavigationGoal, Navigator, NavigatorState, Pose, PoseSensors,
    Turn, WheelActuator,
};
use crate::navigator::{bearing_to, speed_for, turn_direction};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Records every committed wheel pair.
#[derive(Default)]
struct RecordingWheels {
    commands: Vec<(f64, f64)>,
}

impl WheelActuator for RecordingWheels {
    fn set_wheel_velocities(&mut self, left: f64, right: f64) {
        self.commands.push((left, right));
    }
}

/// Minimal differential-drive body integrated with one Euler step per tick.
struct Body {
    x:     f64,
    z:     f64,
    yaw:   f64,
    left:  f64,
    right: f64,
}

const WHEEL_RADIUS: f64 = 0.005;
const AXLE_TRACK:   f64 = 0.06;
const TICK_SECS:    f64 = 0.064;
const MAX_SPEED:    f64 = 6.28;

impl Body {
    /// Body at `(x, z)` whose compass reads `heading_deg`.
    fn at(x: f64, z: f64, heading_deg: f64) -> Self {
        Self { x, z, yaw: (heading_deg - 180.0).to_radians(), left: 0.0, right: 0.0 }
    }

    fn step(&mut self) {
        let v = WHEEL_RADIUS * (self.left + self.right) / 2.0;
        let w = WHEEL_RADIUS * (self.right - self.left) / AXLE_TRACK;
        self.x   += v * self.yaw.cos() * TICK_SECS;
        self.z   += v * self.yaw.sin() * TICK_SECS;
        self.yaw += w * TICK_SECS;
    }
}

impl PoseSensors for Body {
    fn compass(&self) -> [f64; 3] {
        [self.yaw.sin(), 0.0, -self.yaw.cos()]
    }

    fn gps(&self) -> [f64; 3] {
        [self.x, 0.0, self.z]
    }
}

impl WheelActuator for Body {
    fn set_wheel_velocities(&mut self, left: f64, right: f64) {
        self.left  = left;
        self.right = right;
    }
}

/// Drive `body` toward `goal` until the navigator finishes or `limit` ticks
/// pass.  Returns the number of ticks used.
fn drive(body: &mut Body, nav: &mut Navigator, goal: &NavigationGoal, limit: u32) -> u32 {
    let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
    for tick in 0..limit {
        body.step();
        let pose = Pose::from_sensors(&*body);
        if nav.advance(goal, &pose, &mut driver, &mut *body) == NavigatorState::Finished {
            return tick;
        }
    }
    limit
}

// ── Pose ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pose {
    use super::*;
    use crate::heading_from_compass;

    #[test]
    fn compass_heading_cardinals() {
        assert!((heading_from_compass([0.0, 0.0, -1.0]) - 180.0).abs() < 1e-9);
        assert!((heading_from_compass([1.0, 0.0, 0.0]) - 270.0).abs() < 1e-9);
        assert!(heading_from_compass([0.0, 0.0, 1.0]).abs() < 1e-9);
        assert!((heading_from_compass([-1.0, 0.0, 0.0]) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn heading_always_in_range() {
        for i in 0..72 {
            let a = i as f64 * 5.0_f64.to_radians();
            let h = heading_from_compass([a.cos(), 0.3, a.sin()]);
            assert!((0.0..360.0).contains(&h), "{h}");
        }
    }

    #[test]
    fn vertical_axis_ignored() {
        let p = Pose::from_readings([0.0, 0.0, -1.0], [0.25, 9.0, -0.5]);
        assert_eq!(p.position, Point::new(0.25, -0.5));
    }

    #[test]
    fn body_heading_matches_construction() {
        let body = Body::at(0.0, 0.0, 37.0);
        let p = Pose::from_sensors(&body);
        assert!(angular_error_deg(p.heading_deg, 37.0) < 1e-9);
    }
}

// ── MotionDriver ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use super::*;
    use crate::{MotionError, WheelCommand};

    #[test]
    fn rejects_bad_max_speed() {
        assert!(matches!(MotionDriver::new(0.0), Err(MotionError::InvalidMaxSpeed(_))));
        assert!(MotionDriver::new(f64::NAN).is_err());
    }

    #[test]
    fn starts_halted_with_half_speed_default() {
        let d = MotionDriver::new(10.0).unwrap();
        assert_eq!(d.command(), WheelCommand::STOP);
        assert_eq!(d.default_speed(), 5.0);
    }

    #[test]
    fn turns_pivot_with_opposite_signs() {
        let mut d = MotionDriver::new(10.0).unwrap();
        d.turn_left(3.0);
        assert_eq!(d.command(), WheelCommand { left: -3.0, right: 3.0 });
        d.turn_right(3.0);
        assert_eq!(d.command(), WheelCommand { left: 3.0, right: -3.0 });
        d.backward(2.0);
        assert_eq!(d.command(), WheelCommand { left: -2.0, right: -2.0 });
    }

    #[test]
    fn speed_steps_are_clamped() {
        let mut d = MotionDriver::new(10.0).unwrap();
        d.forward(9.5);
        d.increment_speed();
        assert_eq!(d.speed(), 10.0);
        d.forward(0.5);
        d.decrement_speed();
        assert_eq!(d.speed(), 0.0);
        d.increment_speed();
        assert!((d.speed() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn increment_keeps_direction() {
        let mut d = MotionDriver::new(10.0).unwrap();
        d.backward(5.0);
        d.increment_speed();
        assert_eq!(d.command(), WheelCommand { left: -6.0, right: -6.0 });
    }

    #[test]
    fn nothing_moves_until_commit() {
        let mut wheels = RecordingWheels::default();
        let mut d = MotionDriver::new(10.0).unwrap();
        d.forward(4.0);
        assert!(wheels.commands.is_empty());
        d.commit(&mut wheels);
        assert_eq!(wheels.commands, vec![(4.0, 4.0)]);
    }
}

// ── Bearing and steering rules ────────────────────────────────────────────────

#[cfg(test)]
mod bearing {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mirrored_cardinals() {
        let o = Point::ORIGIN;
        assert!(close(bearing_to(o, Point::new(1.0, 0.0), BearingRule::Mirrored), 180.0));
        assert!(close(bearing_to(o, Point::new(0.0, 1.0), BearingRule::Mirrored), 270.0));
        assert!(close(bearing_to(o, Point::new(-1.0, 0.0), BearingRule::Mirrored), 360.0));
        // Mirror image of +z.
        assert!(close(bearing_to(o, Point::new(0.0, -1.0), BearingRule::Mirrored), 270.0));
    }

    #[test]
    fn signed_cardinals() {
        let o = Point::ORIGIN;
        assert!(close(bearing_to(o, Point::new(1.0, 0.0), BearingRule::Signed), 180.0));
        assert!(close(bearing_to(o, Point::new(0.0, 1.0), BearingRule::Signed), 270.0));
        let west = bearing_to(o, Point::new(-1.0, 0.0), BearingRule::Signed);
        assert!((0.0..360.0).contains(&west) && angular_error_deg(west, 0.0) < 1e-9);
        assert!(close(bearing_to(o, Point::new(0.0, -1.0), BearingRule::Signed), 90.0));
    }

    #[test]
    fn rules_agree_when_dz_non_negative() {
        let from = Point::new(0.2, 0.1);
        for target in [Point::new(0.5, 0.4), Point::new(-0.3, 0.9), Point::new(0.9, 0.1)] {
            let m = bearing_to(from, target, BearingRule::Mirrored);
            let s = bearing_to(from, target, BearingRule::Signed);
            assert!(close(m, s), "{target}: {m} vs {s}");
        }
    }

    /// The turn direction depends only on the target's half of the compass,
    /// so going from 80° to 95° takes the long way round.
    #[test]
    fn hemispherical_rule_can_take_long_way() {
        assert_eq!(turn_direction(95.0), Turn::Right);
        assert_eq!(turn_direction(90.0), Turn::Right);
        assert_eq!(turn_direction(270.0), Turn::Right);
        assert_eq!(turn_direction(89.9), Turn::Left);
        assert_eq!(turn_direction(0.0), Turn::Left);

        let mut nav = Navigator::new(0.0, BearingRule::Signed);
        let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
        let mut wheels = RecordingWheels::default();
        // Goal whose bearing is 95°; the robot faces 80°.
        let phi = (95.0_f64 - 180.0).to_radians();
        let goal = NavigationGoal::new(Point::new(phi.cos(), phi.sin()), 0.0);
        let pose = Pose::new(Point::ORIGIN, 80.0);
        nav.advance(&goal, &pose, &mut driver, &mut wheels); // Idle → Facing
        nav.advance(&goal, &pose, &mut driver, &mut wheels);
        let (left, right) = *wheels.commands.last().unwrap();
        assert!(left > 0.0 && right < 0.0, "expected right turn, got {left}/{right}");
    }

    #[test]
    fn flat_speed_law() {
        assert_eq!(speed_for(3.99, 10.0), 0.1);
        assert_eq!(speed_for(0.06, 10.0), 0.1);
        assert_eq!(speed_for(4.0, 10.0), 10.0);
        assert_eq!(speed_for(179.0, 10.0), 10.0);
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod navigator {
    use super::*;

    #[test]
    fn idle_moves_to_facing_unconditionally() {
        let mut nav = Navigator::new(180.0, BearingRule::Signed);
        let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
        let mut wheels = RecordingWheels::default();
        let goal = NavigationGoal::new(Point::ORIGIN, 0.0);
        let pose = Pose::new(Point::ORIGIN, 180.0);
        assert_eq!(nav.advance(&goal, &pose, &mut driver, &mut wheels), NavigatorState::Facing);
        assert_eq!(wheels.commands, vec![(0.0, 0.0)]);
    }

    #[test]
    fn aligned_robot_skips_turning() {
        let mut nav = Navigator::new(180.0, BearingRule::Signed);
        let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
        let mut wheels = RecordingWheels::default();
        let goal = NavigationGoal::new(Point::new(1.0, 0.0), 0.0);
        let pose = Pose::new(Point::ORIGIN, 180.0);
        nav.advance(&goal, &pose, &mut driver, &mut wheels);
        assert_eq!(nav.advance(&goal, &pose, &mut driver, &mut wheels), NavigatorState::Translating);
        nav.advance(&goal, &pose, &mut driver, &mut wheels);
        assert_eq!(*wheels.commands.last().unwrap(), (MAX_SPEED, MAX_SPEED));
    }

    #[test]
    fn reaches_order_counter() {
        let mut body = Body::at(0.0, 0.0, 180.0);
        let mut nav = Navigator::new(180.0, BearingRule::Signed);
        let goal = NavigationGoal::new(Point::new(0.375, 0.375), -FRAC_PI_2);
        let ticks = drive(&mut body, &mut nav, &goal, 20_000);
        assert!(ticks < 20_000, "navigator never finished");
        assert!((body.x - 0.375).abs() < 0.01 && (body.z - 0.375).abs() < 0.01);
        let heading = Pose::from_sensors(&body).heading_deg;
        assert!(angular_error_deg(heading, 90.0) < 0.1, "heading {heading}");
    }

    #[test]
    fn reaches_targets_in_every_quadrant() {
        for target in [
            Point::new(0.375, -0.375),
            Point::new(-0.2, 0.3),
            Point::new(-0.25, -0.1),
            Point::new(0.0, 0.4),
        ] {
            let mut body = Body::at(0.1, 0.0, 270.0);
            let mut nav = Navigator::new(270.0, BearingRule::Signed);
            let goal = NavigationGoal::new(target, PI);
            let ticks = drive(&mut body, &mut nav, &goal, 20_000);
            assert!(ticks < 20_000, "never reached {target}");
            assert!(Point::new(body.x, body.z).within(target, 0.011), "stopped at ({}, {})", body.x, body.z);
        }
    }

    #[test]
    fn mirrored_rule_reaches_targets_with_positive_dz() {
        let mut body = Body::at(0.0, 0.0, 200.0);
        let mut nav = Navigator::new(200.0, BearingRule::Mirrored);
        let goal = NavigationGoal::new(Point::new(0.2, 0.3), 0.0);
        assert!(drive(&mut body, &mut nav, &goal, 20_000) < 20_000);
    }

    /// The mirrored transform faces the reflection of a target behind the
    /// robot's `z`, so translation runs away from it and never arrives.
    #[test]
    fn mirrored_rule_misses_targets_with_negative_dz() {
        assert_eq!(BearingRule::default(), BearingRule::Signed);

        let target = Point::new(0.2, -0.3);
        let goal = NavigationGoal::new(target, 0.0);

        let mut body = Body::at(0.0, 0.0, 200.0);
        let mut nav = Navigator::new(200.0, BearingRule::Mirrored);
        assert_eq!(drive(&mut body, &mut nav, &goal, 3_000), 3_000);
        assert_eq!(nav.state(), NavigatorState::Translating);
        assert!(body.z > 0.0, "drove toward z = {}", body.z);

        let mut body = Body::at(0.0, 0.0, 200.0);
        let mut nav = Navigator::new(200.0, BearingRule::Signed);
        assert!(drive(&mut body, &mut nav, &goal, 20_000) < 20_000);
    }

    #[test]
    fn finished_is_idempotent_and_only_halts() {
        let mut body = Body::at(0.0, 0.0, 180.0);
        let mut nav = Navigator::new(180.0, BearingRule::Signed);
        let goal = NavigationGoal::new(Point::new(0.1, 0.0), 0.0);
        drive(&mut body, &mut nav, &goal, 20_000);
        assert_eq!(nav.state(), NavigatorState::Finished);

        let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
        let mut wheels = RecordingWheels::default();
        let pose = Pose::new(Point::new(5.0, 5.0), 3.0);
        for _ in 0..3 {
            assert_eq!(nav.advance(&goal, &pose, &mut driver, &mut wheels), NavigatorState::Finished);
        }
        assert_eq!(wheels.commands, vec![(0.0, 0.0); 3]);
    }

    #[test]
    fn final_heading_wraps_near_zero() {
        // Start heading 350°, offset +20° lands on 10°, reached turning left.
        let mut nav = Navigator::new(350.0, BearingRule::Signed);
        let goal = NavigationGoal::new(Point::ORIGIN, 20.0_f64.to_radians());
        assert!((nav.final_heading(&goal) - 10.0).abs() < 1e-9);

        let mut body = Body::at(0.0, 0.0, 350.0);
        assert!(drive(&mut body, &mut nav, &goal, 20_000) < 20_000);
        let heading = Pose::from_sensors(&body).heading_deg;
        assert!(angular_error_deg(heading, 10.0) < 0.1, "heading {heading}");
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut nav = Navigator::new(0.0, BearingRule::Signed);
        let mut driver = MotionDriver::new(MAX_SPEED).unwrap();
        let mut wheels = RecordingWheels::default();
        let goal = NavigationGoal::new(Point::new(1.0, 0.0), 0.0);
        nav.advance(&goal, &Pose::default(), &mut driver, &mut wheels);
        assert_ne!(nav.state(), NavigatorState::Idle);
        nav.reset();
        assert_eq!(nav.state(), NavigatorState::Idle);
    }
}
