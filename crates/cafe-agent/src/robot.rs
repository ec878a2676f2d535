//! The shared robot core: one implementation of the tick for every role.

use cafe_core::{AgentId, Money, Role};
use cafe_ledger::{LedgerError, RecordStore};
use cafe_motion::{Hardware, MotionDriver, Navigator, NavigatorState, Pose};
use cafe_radio::{Payload, Radio};
use tracing::{debug, info, warn};

use crate::{
    Agent, AgentContext, AgentError, AgentMode, AgentResult, AgentSnapshot, AgentStatus, CafeLayout, Key, Phase,
    RemoteCommand, RoleBehavior, RoleIo,
};

/// A mobile robot running role `R` against record store `S`.
pub struct Robot<R: RoleBehavior, S: RecordStore> {
    behavior:  R,
    ctx:       AgentContext<R::Phase>,
    store:     S,
    layout:    CafeLayout,
    tick_ms:   u32,
    navigator: Navigator,
    driver:    MotionDriver,
    /// Pose on the first tick.  Return trips aim here.
    home:      Option<Pose>,
    last_pose: Pose,
}

impl<R: RoleBehavior, S: RecordStore> Robot<R, S> {
    /// Load the starting balance and run the role's start hook.
    ///
    /// A robot with no balance row starts at zero.
    pub fn new(
        behavior:        R,
        id:              AgentId,
        mut store:       S,
        layout:          CafeLayout,
        tick_ms:         u32,
        max_wheel_speed: f64,
    ) -> AgentResult<Self> {
        let balance = match store.balance(id) {
            Ok(balance) => balance,
            Err(LedgerError::RecordNotFound(_)) => {
                warn!(agent = %id, "no starting balance; using 0.00");
                Money::ZERO
            }
            Err(err) => return Err(err.into()),
        };
        let ctx = AgentContext::new(id, balance);
        behavior.on_start(&ctx, &mut store)?;

        Ok(Self {
            navigator: Navigator::new(0.0, layout.bearing_rule),
            driver:    MotionDriver::new(max_wheel_speed)?,
            behavior,
            ctx,
            store,
            layout,
            tick_ms,
            home:      None,
            last_pose: Pose::default(),
        })
    }

    #[inline]
    pub fn context(&self) -> &AgentContext<R::Phase> {
        &self.ctx
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn navigator_state(&self) -> NavigatorState {
        self.navigator.state()
    }

    /// Start pose, once the first tick has run.
    #[inline]
    pub fn home(&self) -> Option<Pose> {
        self.home
    }

    fn label(&self) -> String {
        self.behavior.label(self.ctx.id)
    }
}

impl<R: RoleBehavior, S: RecordStore> Agent for Robot<R, S> {
    fn id(&self) -> AgentId {
        self.ctx.id
    }

    fn role(&self) -> Role {
        self.behavior.role()
    }

    fn status(&self) -> AgentStatus {
        if self.ctx.mode == AgentMode::Terminated { AgentStatus::Terminated } else { AgentStatus::Running }
    }

    fn tick(&mut self, hw: &mut dyn Hardware, key: Option<Key>, radio: &mut dyn Radio) -> AgentStatus {
        if self.ctx.mode == AgentMode::Terminated {
            return AgentStatus::Terminated;
        }

        let pose = Pose::from_sensors(&*hw);
        self.last_pose = pose;
        let home = match self.home {
            Some(home) => home,
            None => {
                info!(agent = %self.ctx.id, position = %pose.position, heading = pose.heading_deg, "start pose recorded");
                self.navigator.set_start_heading(pose.heading_deg);
                self.home = Some(pose);
                pose
            }
        };
        let who = self.label();

        let mut io = RoleIo {
            tick_ms:   self.tick_ms,
            pose,
            home,
            layout:    &self.layout,
            radio,
            store:     &mut self.store,
            navigator: &mut self.navigator,
            driver:    &mut self.driver,
            hw,
        };

        // ── Receive: at most one message per tick ─────────────────────────
        let phase = self.ctx.phase;
        if let Some(text) = io.radio.receive() {
            let next = Payload::decode(&text)
                .map_err(AgentError::from)
                .and_then(|payload| interpret(&self.behavior, &who, self.ctx.clone(), payload, &mut io));
            match next {
                Ok(ctx) => self.ctx = ctx,
                Err(err) => warn!(agent = %self.ctx.id, payload = %text, error = %err, "message ignored"),
            }
        }
        if self.ctx.phase != phase {
            io.navigator.reset();
        }

        // ── Dispatch on mode ──────────────────────────────────────────────
        let phase = self.ctx.phase;
        match self.ctx.mode {
            AgentMode::Remote => {
                if let Some(cmd) = key.and_then(|k| self.behavior.remote_command(k)) {
                    remote(cmd, &who, &mut self.ctx, &mut io);
                }
            }
            AgentMode::Auto => match self.behavior.auto_mode(self.ctx.clone(), &mut io) {
                Ok(ctx) => self.ctx = ctx,
                Err(err) => warn!(agent = %self.ctx.id, phase = self.ctx.phase.as_str(), error = %err, "auto step failed"),
            },
            AgentMode::Idle | AgentMode::Terminated => {}
        }
        if self.ctx.phase != phase {
            debug!(agent = %self.ctx.id, from = phase.as_str(), to = self.ctx.phase.as_str(), "phase");
            io.navigator.reset();
        }

        if self.ctx.mode == AgentMode::Terminated {
            io.stop();
            self.behavior.on_terminate(&self.ctx, &mut io);
            info!(agent = %self.ctx.id, "{who} terminated");
            return AgentStatus::Terminated;
        }
        AgentStatus::Running
    }

    fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id:          self.ctx.id,
            role:        self.behavior.role(),
            mode:        self.ctx.mode,
            phase:       self.ctx.phase.as_str(),
            position:    self.last_pose.position,
            heading_deg: self.last_pose.heading_deg,
            balance:     self.ctx.balance,
        }
    }
}

/// Core events every role shares; the rest go to the role.
fn interpret<R: RoleBehavior>(
    behavior: &R,
    who:      &str,
    mut ctx:  AgentContext<R::Phase>,
    payload:  Payload,
    io:       &mut RoleIo<'_>,
) -> AgentResult<AgentContext<R::Phase>> {
    match payload {
        Payload::SetMode(code) => {
            let mode = AgentMode::from_wire(code).ok_or(AgentError::UnknownMode(code))?;
            info!(agent = %ctx.id, from = ctx.mode.as_str(), to = mode.as_str(), "mode change");
            if mode == AgentMode::Remote {
                info!("{who}: remote mode, waiting for keys");
            }
            ctx.mode = mode;
            Ok(ctx)
        }
        Payload::PrintBalance => {
            info!("{who}: My current balance is {}", ctx.balance);
            Ok(ctx)
        }
        Payload::Terminate => {
            info!("{who}: My current balance is {}", ctx.balance);
            ctx.mode = AgentMode::Terminated;
            Ok(ctx)
        }
        other => behavior.process_data(ctx, other, io),
    }
}

/// Apply one manual-driving command and commit it.
fn remote<P: Phase>(cmd: RemoteCommand, who: &str, ctx: &mut AgentContext<P>, io: &mut RoleIo<'_>) {
    let speed = io.driver.default_speed();
    match cmd {
        RemoteCommand::Forward   => io.driver.forward(speed),
        RemoteCommand::Backward  => io.driver.backward(speed),
        RemoteCommand::TurnLeft  => io.driver.turn_left(speed),
        RemoteCommand::TurnRight => io.driver.turn_right(speed),
        RemoteCommand::SpeedUp   => io.driver.increment_speed(),
        RemoteCommand::SpeedDown => io.driver.decrement_speed(),
        RemoteCommand::Halt      => io.driver.halt(),
        RemoteCommand::Exit      => {
            io.driver.halt();
            info!("{who}: Remote mode was exited");
            ctx.mode = AgentMode::Terminated;
        }
    }
    io.driver.commit(&mut *io.hw);
}
