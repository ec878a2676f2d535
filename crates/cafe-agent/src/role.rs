//! The seam between the shared robot core and a role's ordering protocol.

use cafe_core::{AgentId, Role};
use cafe_ledger::RecordStore;
use cafe_motion::{Hardware, MotionDriver, NavigationGoal, Navigator, NavigatorState, Pose};
use cafe_radio::{ChannelId, Payload, Radio};
use tracing::error;

use crate::{AgentContext, AgentResult, CafeLayout, Key, Phase, RemoteCommand};

/// Everything a role may touch during one tick.
pub struct RoleIo<'a> {
    pub tick_ms:   u32,
    /// Pose sampled at the start of this tick.
    pub pose:      Pose,
    /// Pose recorded on the robot's first tick.
    pub home:      Pose,
    pub layout:    &'a CafeLayout,
    pub radio:     &'a mut dyn Radio,
    pub store:     &'a mut dyn RecordStore,
    pub navigator: &'a mut Navigator,
    pub driver:    &'a mut MotionDriver,
    pub hw:        &'a mut dyn Hardware,
}

impl RoleIo<'_> {
    /// Advance toward `goal`.  Returns `true` on the tick the goal is reached.
    pub fn travel(&mut self, goal: &NavigationGoal) -> bool {
        self.navigator.advance(goal, &self.pose, self.driver, &mut *self.hw) == NavigatorState::Finished
    }

    /// Back to the start position, facing the start heading.
    pub fn home_goal(&self) -> NavigationGoal {
        NavigationGoal::new(self.home.position, 0.0)
    }

    pub fn send(&mut self, to: ChannelId, payload: &Payload) {
        self.radio.send(to, payload);
    }

    /// Halt both wheels now.
    pub fn stop(&mut self) {
        self.driver.halt();
        self.driver.commit(&mut *self.hw);
    }
}

/// A role's half of the robot state machine.
///
/// The shared core handles mode changes, `?` and `~`; every other payload is
/// passed to [`process_data`][Self::process_data].  Transitions take the
/// context by value and return the next one.
pub trait RoleBehavior {
    type Phase: Phase;

    fn role(&self) -> Role;

    /// Name used in narration, e.g. `"Customer 1"`.
    fn label(&self, id: AgentId) -> String;

    /// Called once when the robot is created.
    fn on_start(&self, _ctx: &AgentContext<Self::Phase>, _store: &mut dyn RecordStore) -> AgentResult<()> {
        Ok(())
    }

    /// Interpret one role event.
    fn process_data(
        &self,
        ctx:     AgentContext<Self::Phase>,
        payload: Payload,
        io:      &mut RoleIo<'_>,
    ) -> AgentResult<AgentContext<Self::Phase>>;

    /// One step of the ordering protocol; called only in `Auto` mode.
    fn auto_mode(
        &self,
        ctx: AgentContext<Self::Phase>,
        io:  &mut RoleIo<'_>,
    ) -> AgentResult<AgentContext<Self::Phase>>;

    /// Manual-driving keymap.
    fn remote_command(&self, key: Key) -> Option<RemoteCommand>;

    /// Called once when the robot terminates.
    fn on_terminate(&self, ctx: &AgentContext<Self::Phase>, io: &mut RoleIo<'_>) {
        if let Err(err) = io.store.flush() {
            error!(agent = %ctx.id, error = %err, "record store flush failed");
        }
    }
}
