//! The director: a stationary coordinator driven by the console menu.
//!
//! ```text
//! Initial ──r──► RemoteSelect ──1..5──► Remote ──q──► Terminated
//!    │  └──a──► AutoDispatch ◄──"Order Complete"── AutoWaitAck
//!    │              └── order sent ──────────────────────┘
//!    └──q──► Terminated          source exhausted ──► Terminated
//! ```

use cafe_core::{AgentId, Role};
use cafe_ledger::RecordStore;
use cafe_radio::{ChannelId, Payload, Radio};
use tracing::{debug, info, warn};

use crate::{AgentMode, AgentStatus, Key};

/// Director sub-state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectorPhase {
    #[default]
    Initial,
    RemoteSelect,
    Remote,
    AutoDispatch,
    AutoWaitAck,
    Terminated,
}

impl DirectorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectorPhase::Initial      => "initial",
            DirectorPhase::RemoteSelect => "remote_select",
            DirectorPhase::Remote       => "remote",
            DirectorPhase::AutoDispatch => "auto_dispatch",
            DirectorPhase::AutoWaitAck  => "auto_wait_ack",
            DirectorPhase::Terminated   => "terminated",
        }
    }
}

/// Robots the director can hand to remote control.
const REMOTE_KEYS: [char; 5] = ['1', '2', '3', '4', '5'];

/// Dispatches orders from `S` one at a time and switches robots between modes.
pub struct Director<S: RecordStore> {
    phase:        DirectorPhase,
    store:        S,
    roster:       Vec<(AgentId, Role)>,
    completed:    u32,
    menu_printed: bool,
}

impl<S: RecordStore> Director<S> {
    pub fn new(store: S) -> Self {
        Self { phase: DirectorPhase::Initial, store, roster: Vec::new(), completed: 0, menu_printed: false }
    }

    /// Registered robots.  Listed when entering remote selection; orders
    /// are only dispatched to customers on it.
    pub fn with_roster(mut self, roster: Vec<(AgentId, Role)>) -> Self {
        self.roster = roster;
        self
    }

    #[inline]
    pub fn phase(&self) -> DirectorPhase {
        self.phase
    }

    /// Orders acknowledged so far.
    #[inline]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status(&self) -> AgentStatus {
        if self.phase == DirectorPhase::Terminated { AgentStatus::Terminated } else { AgentStatus::Running }
    }

    /// One director step: react to `key`, then advance auto dispatch.
    pub fn tick(&mut self, key: Option<Key>, radio: &mut dyn Radio) -> AgentStatus {
        if self.phase == DirectorPhase::Terminated {
            return AgentStatus::Terminated;
        }
        if !self.menu_printed {
            print_menu();
            self.menu_printed = true;
        }

        let before = self.phase;
        if let Some(key) = key {
            self.on_key(key, radio);
        }

        match self.phase {
            DirectorPhase::AutoDispatch if before == DirectorPhase::AutoDispatch => self.dispatch(radio),
            DirectorPhase::AutoWaitAck => self.await_ack(radio),
            _ => {}
        }

        if self.phase != before {
            debug!(from = before.as_str(), to = self.phase.as_str(), "director");
        }
        self.status()
    }

    fn on_key(&mut self, key: Key, radio: &mut dyn Radio) {
        match self.phase {
            DirectorPhase::Initial => self.menu_select(key, radio),
            DirectorPhase::RemoteSelect => self.remote_select(key, radio),
            DirectorPhase::Remote if key.is_char('q') => self.quit_all(radio),
            _ => {}
        }
    }

    fn menu_select(&mut self, key: Key, radio: &mut dyn Radio) {
        match key.normalized() {
            Key::Char('i') => print_menu(),
            Key::Char('r') => {
                info!("Director: Please select the robot to control remotely:");
                for (id, role) in &self.roster {
                    info!("Director: Press [{}] to control {role} {id}.", id.0);
                }
                self.phase = DirectorPhase::RemoteSelect;
            }
            Key::Char('a') => {
                info!("Director: Auto Mode starts");
                radio.send(ChannelId::BROADCAST, &Payload::PrintBalance);
                radio.send(ChannelId::BROADCAST, &Payload::SetMode(AgentMode::Auto.to_wire()));
                self.phase = DirectorPhase::AutoDispatch;
            }
            Key::Char('q') => self.quit_all(radio),
            _ => {
                info!("Director: Command not found.");
                print_menu();
            }
        }
    }

    fn remote_select(&mut self, key: Key, radio: &mut dyn Radio) {
        let target = match key {
            Key::Char(c) if REMOTE_KEYS.contains(&c) => AgentId::from_digit(c),
            _ => None,
        };
        match target {
            Some(id) => {
                radio.send(ChannelId::from(id), &Payload::SetMode(AgentMode::Remote.to_wire()));
                info!("Director: Robot {} has now been told to be remotely controlled.", id.0);
                self.phase = DirectorPhase::Remote;
            }
            None => {
                info!("Director: Command not found.");
                print_menu();
                self.phase = DirectorPhase::Initial;
            }
        }
    }

    fn dispatch(&mut self, radio: &mut dyn Radio) {
        while let Some(order) = self.store.next_order() {
            if !self.is_customer(order.customer) {
                // Nobody would ever acknowledge it.
                warn!(customer = %order.customer, item = %order.item, "order for unknown customer skipped");
                continue;
            }
            info!(customer = %order.customer, item = %order.item, "dispatch order");
            radio.send(ChannelId::from(order.customer), &Payload::Item(order.item));
            self.phase = DirectorPhase::AutoWaitAck;
            return;
        }
        info!("Director: All orders are completed");
        self.quit_all(radio);
    }

    fn is_customer(&self, id: AgentId) -> bool {
        self.roster.iter().any(|&(robot, role)| robot == id && role == Role::Customer)
    }

    fn await_ack(&mut self, radio: &mut dyn Radio) {
        let Some(text) = radio.receive() else { return };
        match Payload::decode(&text) {
            Ok(Payload::OrderComplete) => {
                self.completed += 1;
                info!("Director: Order {} complete", self.completed);
                self.phase = DirectorPhase::AutoDispatch;
            }
            Ok(other) => debug!(payload = %other, "director ignored payload"),
            Err(err) => warn!(payload = %text, error = %err, "message ignored"),
        }
    }

    fn quit_all(&mut self, radio: &mut dyn Radio) {
        radio.send(ChannelId::BROADCAST, &Payload::Terminate);
        self.phase = DirectorPhase::Terminated;
    }
}

fn print_menu() {
    info!("Director: This is a simulation for the café.");
    info!("Director: Press [I] to reprint the commands.");
    info!("Director: Press [R] to remote control a robot.");
    info!("Director: Press [A] to enter the auto mode.");
    info!("Director: Press [Q] to quit all controllers.");
}
