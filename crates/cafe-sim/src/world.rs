//! A flat kinematic café floor standing in for the physics engine.
//!
//! Each robot is a differential-drive body integrated with one Euler step per
//! tick:
//!
//! ```text
//! v   = r (ωl + ωr) / 2          forward speed, m/s
//! ω   = r (ωr − ωl) / track      yaw rate, rad/s
//! x  += v cos(yaw) dt
//! z  += v sin(yaw) dt
//! yaw += ω dt
//! ```
//!
//! The compass reads `(sin yaw, 0, −cos yaw)` and GPS reads `(x, 0, z)`, so a
//! robot's heading is `yaw + 180°`.  Readings can be jittered with a seeded
//! per-robot [`SensorRng`]; the default jitter is zero.

use std::collections::BTreeMap;

use cafe_core::{AgentId, Point, Role, SensorRng, normalize_deg};
use cafe_motion::{Hardware, Pose, PoseSensors, WheelActuator};

use crate::{SimError, SimResult};

/// Physical constants of the floor and its robots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Wheel radius, metres.
    pub wheel_radius:       f64,
    /// Distance between the wheels, metres.
    pub axle_track:         f64,
    /// Largest wheel speed, rad/s.
    pub max_wheel_speed:    f64,
    /// GPS noise amplitude per axis, metres.
    pub gps_jitter_m:       f64,
    /// Compass noise amplitude, degrees.
    pub compass_jitter_deg: f64,
}

impl Default for WorldConfig {
    /// One max-speed tick turns 3.84° and travels 2 mm.
    fn default() -> Self {
        Self {
            wheel_radius:       0.005,
            axle_track:         0.06,
            max_wheel_speed:    6.28,
            gps_jitter_m:       0.0,
            compass_jitter_deg: 0.0,
        }
    }
}

/// Where a robot starts when no pose is configured.
///
/// Customers line up along `x = 0` facing +x; staff waits behind the
/// counters.
pub fn default_home(role: Role, id: AgentId) -> Pose {
    match role {
        Role::Staff => Pose::new(Point::new(1.0, 0.0), 0.0),
        _ => {
            let slot = f64::from(id.0.saturating_sub(1));
            Pose::new(Point::new(0.0, 0.375 - 0.25 * slot), 180.0)
        }
    }
}

/// One simulated robot body.
#[derive(Clone, Debug)]
pub struct Body {
    x:               f64,
    z:               f64,
    yaw:             f64,
    left:            f64,
    right:           f64,
    max_wheel_speed: f64,
    gps_noise:       [f64; 2],
    compass_noise:   f64,
}

impl Body {
    /// Body at `pose`, wheels stopped.
    pub fn at(pose: Pose, max_wheel_speed: f64) -> Self {
        Self {
            x:               pose.position.x,
            z:               pose.position.z,
            yaw:             (pose.heading_deg - 180.0).to_radians(),
            left:            0.0,
            right:           0.0,
            max_wheel_speed,
            gps_noise:       [0.0; 2],
            compass_noise:   0.0,
        }
    }

    /// True position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.z)
    }

    /// True heading, degrees in `[0, 360)`.
    pub fn heading_deg(&self) -> f64 {
        normalize_deg(self.yaw.to_degrees() + 180.0)
    }

    /// Last wheel velocities applied.
    pub fn wheels(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    /// Integrate one step of `dt` seconds.
    pub fn step(&mut self, config: &WorldConfig, dt: f64) {
        let r = config.wheel_radius;
        let v = r * (self.left + self.right) / 2.0;
        let w = r * (self.right - self.left) / config.axle_track;
        self.x   += v * self.yaw.cos() * dt;
        self.z   += v * self.yaw.sin() * dt;
        self.yaw += w * dt;
    }
}

impl PoseSensors for Body {
    fn compass(&self) -> [f64; 3] {
        let yaw = self.yaw + self.compass_noise.to_radians();
        [yaw.sin(), 0.0, -yaw.cos()]
    }

    fn gps(&self) -> [f64; 3] {
        [self.x + self.gps_noise[0], 0.0, self.z + self.gps_noise[1]]
    }
}

impl WheelActuator for Body {
    fn set_wheel_velocities(&mut self, left: f64, right: f64) {
        let max = self.max_wheel_speed;
        self.left  = left.clamp(-max, max);
        self.right = right.clamp(-max, max);
    }
}

impl Hardware for Body {
    fn max_wheel_speed(&self) -> f64 {
        self.max_wheel_speed
    }
}

/// A body plus the generator that jitters its sensors.
struct Slot {
    body: Body,
    rng:  SensorRng,
}

/// Every robot body on the floor, keyed by id.
pub struct World {
    config: WorldConfig,
    seed:   u64,
    slots:  BTreeMap<AgentId, Slot>,
}

impl World {
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        Self { config, seed, slots: BTreeMap::new() }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Place a new body.  Fails if `id` already has one.
    pub fn spawn(&mut self, id: AgentId, start: Pose) -> SimResult<()> {
        if self.slots.contains_key(&id) {
            return Err(SimError::DuplicateAgent(id));
        }
        let mut slot = Slot {
            body: Body::at(start, self.config.max_wheel_speed),
            rng:  SensorRng::new(self.seed, id),
        };
        resample(&mut slot, &self.config);
        self.slots.insert(id, slot);
        Ok(())
    }

    pub fn body(&self, id: AgentId) -> Option<&Body> {
        self.slots.get(&id).map(|s| &s.body)
    }

    pub fn body_mut(&mut self, id: AgentId) -> Option<&mut Body> {
        self.slots.get_mut(&id).map(|s| &mut s.body)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Move every body by one step of `dt` seconds and draw fresh sensor
    /// noise.
    pub fn step(&mut self, dt: f64) {
        for slot in self.slots.values_mut() {
            slot.body.step(&self.config, dt);
            resample(slot, &self.config);
        }
    }
}

fn resample(slot: &mut Slot, config: &WorldConfig) {
    slot.body.gps_noise = [slot.rng.jitter(config.gps_jitter_m), slot.rng.jitter(config.gps_jitter_m)];
    slot.body.compass_noise = slot.rng.jitter(config.compass_jitter_deg);
}
