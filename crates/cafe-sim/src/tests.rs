//! Integration tests for cafe-sim.

use cafe_agent::{AgentMode, AgentSnapshot, DirectorPhase, Key};
use cafe_core::{AgentId, Money, Point, Role, SimConfig, Tick};
use cafe_ledger::{CsvStore, MemoryStore, MenuItem};
use cafe_motion::{Hardware, Pose, PoseSensors, WheelActuator};

use crate::{Body, KeyScript, NoopObserver, SimBuilder, SimError, SimObserver, World, WorldConfig, default_home};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> SimConfig {
    SimConfig { max_ticks: 20_000, snapshot_interval_ticks: 0, ..SimConfig::default() }
}

fn coffee() -> MenuItem {
    MenuItem::new("Coffee", 5, Money(350))
}

fn staff_store() -> MemoryStore {
    MemoryStore::new().with_balance(AgentId::STAFF, Money(10_000)).with_menu_item(coffee())
}

fn customer_store(id: AgentId, balance: i64) -> MemoryStore {
    MemoryStore::new().with_balance(id, Money(balance))
}

fn auto_keys() -> KeyScript {
    KeyScript::new().press(Tick(0), Key::Char('a'))
}

fn one_order(item: &str) -> MemoryStore {
    MemoryStore::new().with_order(AgentId(1), item)
}

/// Counts callbacks.
#[derive(Default)]
struct Counter {
    ticks:     u64,
    delivered: usize,
    snapshots: Vec<(Tick, Vec<AgentSnapshot>)>,
    ended:     Option<Tick>,
}

impl SimObserver for Counter {
    fn on_tick_end(&mut self, _tick: Tick, delivered: usize) {
        self.ticks += 1;
        self.delivered += delivered;
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[AgentSnapshot]) {
        self.snapshots.push((tick, robots.to_vec()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod world {
    use super::*;

    #[test]
    fn pose_round_trips_through_sensors() {
        let body = Body::at(Pose::new(Point::new(0.2, -0.1), 135.0), 6.28);
        let pose = Pose::from_sensors(&body);
        assert!((pose.position.x - 0.2).abs() < 1e-12);
        assert!((pose.position.z + 0.1).abs() < 1e-12);
        assert!((pose.heading_deg - 135.0).abs() < 1e-9);
    }

    #[test]
    fn forward_at_max_moves_two_millimetres_per_tick() {
        let config = WorldConfig::default();
        let mut body = Body::at(Pose::new(Point::ORIGIN, 180.0), config.max_wheel_speed);
        body.set_wheel_velocities(6.28, 6.28);
        body.step(&config, 0.064);
        assert!((body.position().x - 0.00200960).abs() < 1e-8);
        assert!(body.position().z.abs() < 1e-12);
    }

    #[test]
    fn pivot_at_max_turns_under_four_degrees() {
        let config = WorldConfig::default();
        let mut body = Body::at(Pose::new(Point::ORIGIN, 180.0), config.max_wheel_speed);
        body.set_wheel_velocities(-6.28, 6.28);
        body.step(&config, 0.064);
        let turned = body.heading_deg() - 180.0;
        assert!(turned > 3.8 && turned < 4.0, "turned {turned}");
        assert_eq!(body.position(), Point::ORIGIN);
    }

    #[test]
    fn wheel_speed_is_clamped() {
        let mut body = Body::at(Pose::default(), 6.28);
        body.set_wheel_velocities(100.0, -100.0);
        assert_eq!(body.wheels(), (6.28, -6.28));
        assert_eq!(body.max_wheel_speed(), 6.28);
    }

    #[test]
    fn jitter_is_seeded() {
        let config = WorldConfig { gps_jitter_m: 0.001, ..WorldConfig::default() };
        let read = || {
            let mut world = World::new(config.clone(), 7);
            world.spawn(AgentId(1), Pose::default()).unwrap();
            world.step(0.064);
            world.body(AgentId(1)).unwrap().gps()
        };
        let a = read();
        assert_eq!(a, read());
        assert!(a[0].abs() <= 0.001 && a[0] != 0.0);
    }

    #[test]
    fn duplicate_spawn_is_rejected() {
        let mut world = World::new(WorldConfig::default(), 1);
        world.spawn(AgentId(1), Pose::default()).unwrap();
        assert!(matches!(world.spawn(AgentId(1), Pose::default()), Err(SimError::DuplicateAgent(_))));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn default_homes_are_distinct() {
        let homes: Vec<Point> = (1..=4).map(|n| default_home(Role::Customer, AgentId(n)).position).collect();
        for (i, a) in homes.iter().enumerate() {
            for b in &homes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_ne!(default_home(Role::Staff, AgentId::STAFF).position, homes[0]);
    }
}

// ── KeyScript ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod keys {
    use super::*;

    #[test]
    fn parses_chars_and_named_keys() {
        let script: KeyScript = "0:a, 12:up ,40:space,41:Q".parse().unwrap();
        assert_eq!(script.len(), 4);
        assert_eq!(script.key_at(Tick(0)), Some(Key::Char('a')));
        assert_eq!(script.key_at(Tick(12)), Some(Key::Up));
        assert_eq!(script.key_at(Tick(40)), Some(Key::Char(' ')));
        assert_eq!(script.key_at(Tick(41)), Some(Key::Char('Q')));
        assert_eq!(script.key_at(Tick(1)), None);
        assert_eq!(script.last_tick(), Some(Tick(41)));
    }

    #[test]
    fn empty_script() {
        let script: KeyScript = "".parse().unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!("a".parse::<KeyScript>(), Err(SimError::KeyScript(_))));
        assert!(matches!("x:a".parse::<KeyScript>(), Err(SimError::KeyScript(_))));
        assert!(matches!("3:ab".parse::<KeyScript>(), Err(SimError::KeyScript(_))));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_one_staff() {
        let sim = SimBuilder::new(test_config())
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 1000))
            .build()
            .unwrap();
        assert!(sim.robot(AgentId(1)).is_some());
        assert_eq!(sim.robot(AgentId::STAFF).unwrap().role(), Role::Staff);
        assert_eq!(sim.world.len(), 2);
        assert_eq!(sim.director_phase(), DirectorPhase::Initial);
    }

    #[test]
    fn missing_director_errors() {
        let result = SimBuilder::new(test_config()).staff(None, staff_store()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn staff_count_is_checked() {
        let none = SimBuilder::new(test_config())
            .director(MemoryStore::new())
            .customer(AgentId(1), None, customer_store(AgentId(1), 0))
            .build();
        assert!(matches!(none, Err(SimError::StaffCount(0))));
    }

    #[test]
    fn duplicate_ids_error() {
        let result = SimBuilder::new(test_config())
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 0))
            .customer(AgentId(1), None, customer_store(AgentId(1), 0))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateAgent(AgentId(1)))));
    }

    #[test]
    fn zero_tick_length_is_rejected() {
        let result = SimBuilder::new(SimConfig { tick_ms: 0, ..test_config() })
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .build();
        match result {
            Err(SimError::Config(reason)) => assert!(reason.contains("tick_ms"), "{reason}"),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("tick_ms = 0 accepted"),
        }
    }

    #[test]
    fn customer_ids_must_be_digits() {
        for bad in [AgentId(5), AgentId(6), AgentId(12)] {
            let result = SimBuilder::new(test_config())
                .director(MemoryStore::new())
                .staff(None, staff_store())
                .customer(bad, None, customer_store(bad, 0))
                .build();
            assert!(matches!(result, Err(SimError::InvalidCustomerId(_))), "{bad}");
        }
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;

    #[test]
    fn quit_key_terminates_everyone() {
        let mut sim = SimBuilder::new(test_config())
            .director(one_order("Coffee"))
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 1000))
            .keys(KeyScript::new().press(Tick(3), Key::Char('q')))
            .build()
            .unwrap();
        let mut counter = Counter::default();
        let summary = sim.run(&mut counter).unwrap();

        assert!(summary.all_terminated);
        assert_eq!(summary.orders_completed, 0);
        // Broadcast at tick 3, delivered at its end, handled at tick 4.
        assert_eq!(summary.ticks, 5);
        assert_eq!(counter.ticks, 5);
        assert_eq!(counter.delivered, 2);
        assert_eq!(counter.ended, Some(Tick(5)));
    }

    #[test]
    fn idle_run_stops_at_max_ticks() {
        let config = SimConfig { max_ticks: 50, ..test_config() };
        let mut sim = SimBuilder::new(config)
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.ticks, 50);
        assert_eq!(summary.elapsed_ms, 50 * 64);
        assert!(!summary.all_terminated);
    }

    #[test]
    fn snapshots_follow_the_interval() {
        let config = SimConfig { max_ticks: 40, snapshot_interval_ticks: 16, ..test_config() };
        let mut sim = SimBuilder::new(config)
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .customer(AgentId(2), None, customer_store(AgentId(2), 100))
            .build()
            .unwrap();
        let mut counter = Counter::default();
        sim.run(&mut counter).unwrap();

        let ticks: Vec<Tick> = counter.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(16), Tick(32)]);
        let ids: Vec<AgentId> = counter.snapshots[0].1.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![AgentId(2), AgentId::STAFF]);
    }

    #[test]
    fn remote_mode_drives_the_selected_robot() {
        let keys: KeyScript = "0:r, 1:1, 3:w, 40:space, 41:e, 45:q".parse().unwrap();
        let mut sim = SimBuilder::new(test_config())
            .director(MemoryStore::new())
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 1000))
            .keys(keys)
            .build()
            .unwrap();
        let start = default_home(Role::Customer, AgentId(1)).position;

        sim.run_ticks(20, &mut NoopObserver).unwrap();
        let snap = sim.robot(AgentId(1)).unwrap().snapshot();
        assert_eq!(snap.mode, AgentMode::Remote);
        assert!(snap.position.x > start.x + 0.01, "moved to {}", snap.position);

        let staff = sim.robot(AgentId::STAFF).unwrap().snapshot();
        assert_eq!(staff.mode, AgentMode::Idle);
        assert_eq!(staff.position, default_home(Role::Staff, AgentId::STAFF).position);

        let summary = sim.run(&mut NoopObserver).unwrap();
        assert!(summary.all_terminated);
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod end_to_end {
    use super::*;
    use std::path::Path;

    fn write_fixtures(dir: &Path, balances: &str, orders: &str) {
        std::fs::write(dir.join("Starting.csv"), balances).unwrap();
        std::fs::write(dir.join("Menu.csv"), "item,prep_time_secs,price\nCoffee,5,3.50\n").unwrap();
        std::fs::write(dir.join("Order.csv"), orders).unwrap();
    }

    #[test]
    fn coffee_is_ordered_paid_prepared_and_collected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_fixtures(dir.path(), "robot,balance\n1,10.00\n5,100.00\n", "customer,item\n1,Coffee\n");

        let mut sim = SimBuilder::new(test_config())
            .director(CsvStore::for_director(dir.path()).unwrap())
            .staff(None, CsvStore::for_staff(dir.path()).unwrap())
            .customer(AgentId(1), None, CsvStore::for_customer(dir.path()).unwrap())
            .keys(auto_keys())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert!(summary.all_terminated, "run cut off after {} ticks", summary.ticks);
        assert_eq!(summary.orders_completed, 1);
        assert_eq!(sim.director_phase(), DirectorPhase::Terminated);

        let customer = sim.robot(AgentId(1)).unwrap().snapshot();
        assert_eq!(customer.balance, Money(650));
        let home = default_home(Role::Customer, AgentId(1)).position;
        assert!(customer.position.within(home, 0.02), "customer ended at {}", customer.position);

        let staff = sim.robot(AgentId::STAFF).unwrap().snapshot();
        assert_eq!(staff.balance, Money(10_350));

        let account = std::fs::read_to_string(dir.path().join("Account.csv")).unwrap();
        assert_eq!(account, "Order,Item,Customer,Account Balance ($)\n0,,,100.00\n1,Coffee,1,103.50\n");
    }

    #[test]
    fn short_customer_cancels_without_a_sale() {
        let mut sim = SimBuilder::new(test_config())
            .director(one_order("Coffee"))
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 349))
            .keys(auto_keys())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert!(summary.all_terminated);
        assert_eq!(summary.orders_completed, 1);
        assert_eq!(sim.robot(AgentId(1)).unwrap().snapshot().balance, Money(349));
        assert_eq!(sim.robot(AgentId::STAFF).unwrap().snapshot().balance, Money(10_000));
    }

    #[test]
    fn menu_miss_cancels_the_cycle() {
        let mut sim = SimBuilder::new(test_config())
            .director(one_order("Cake"))
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 1000))
            .keys(auto_keys())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert!(summary.all_terminated);
        assert_eq!(sim.robot(AgentId(1)).unwrap().snapshot().balance, Money(1000));
    }

    #[test]
    fn orders_are_served_one_at_a_time() {
        let orders = MemoryStore::new().with_order(AgentId(1), "Coffee").with_order(AgentId(2), "Coffee");
        let mut sim = SimBuilder::new(SimConfig { max_ticks: 40_000, ..test_config() })
            .director(orders)
            .staff(None, staff_store())
            .customer(AgentId(1), None, customer_store(AgentId(1), 1000))
            .customer(AgentId(2), None, customer_store(AgentId(2), 500))
            .keys(auto_keys())
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert!(summary.all_terminated, "run cut off after {} ticks", summary.ticks);
        assert_eq!(summary.orders_completed, 2);
        assert_eq!(sim.robot(AgentId(1)).unwrap().snapshot().balance, Money(650));
        assert_eq!(sim.robot(AgentId(2)).unwrap().snapshot().balance, Money(150));
        assert_eq!(sim.robot(AgentId::STAFF).unwrap().snapshot().balance, Money(10_700));
    }
}
