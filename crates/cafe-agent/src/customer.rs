//! Customer ordering protocol.
//!
//! ```text
//! item ──► MoveToOrderCounter ──► AtOrderCounter ──(send "<item><id>")──► Idle
//!   "+"  marks available, "$p" quotes a price ──► Paying
//!   "-"  ──► Paying (unavailable)
//! Paying: affordable ──(debit, ">")──► Idle      otherwise ──("<")──► MoveToStart
//!   "*"  marks ready; Idle with paid + ready ──► MoveToPickupCounter
//! MoveToPickupCounter ──► PickingUp ──("*")──► MoveToStart ──("Order Complete")──► Idle
//! ```

use cafe_core::{AgentId, Role};
use cafe_radio::{ChannelId, Payload, order_line};
use tracing::{debug, info, warn};

use crate::{AgentContext, AgentResult, Key, Order, Phase, RemoteCommand, RoleBehavior, RoleIo, common_command};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum CustomerPhase {
    #[default]
    Idle,
    MoveToOrderCounter,
    AtOrderCounter,
    MoveToPickupCounter,
    Paying,
    PickingUp,
    MoveToStart,
}

impl Phase for CustomerPhase {
    fn as_str(self) -> &'static str {
        match self {
            CustomerPhase::Idle                => "idle",
            CustomerPhase::MoveToOrderCounter  => "move_to_order_counter",
            CustomerPhase::AtOrderCounter      => "at_order_counter",
            CustomerPhase::MoveToPickupCounter => "move_to_pickup_counter",
            CustomerPhase::Paying              => "paying",
            CustomerPhase::PickingUp           => "picking_up",
            CustomerPhase::MoveToStart         => "move_to_start",
        }
    }
}

/// A customer robot.  Drives with `w a s d`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Customer;

type Ctx = AgentContext<CustomerPhase>;

impl RoleBehavior for Customer {
    type Phase = CustomerPhase;

    fn role(&self) -> Role {
        Role::Customer
    }

    fn label(&self, id: AgentId) -> String {
        format!("Customer {}", id.0)
    }

    fn process_data(&self, mut ctx: Ctx, payload: Payload, _io: &mut RoleIo<'_>) -> AgentResult<Ctx> {
        let who = self.label(ctx.id);

        if let Payload::Item(item) = payload {
            if let Some(current) = &ctx.order {
                warn!(agent = %ctx.id, new = %item, current = %current.item, "order already in flight; ignored");
                return Ok(ctx);
            }
            info!("{who}: I am heading to order counter");
            ctx.order = Some(Order::new(item, ctx.id));
            return Ok(ctx.with_phase(CustomerPhase::MoveToOrderCounter));
        }

        let Some(order) = ctx.order.as_mut() else {
            debug!(agent = %ctx.id, ?payload, "no order in flight; ignored");
            return Ok(ctx);
        };
        match payload {
            Payload::ItemNotFound => {
                order.available = false;
                ctx.phase = CustomerPhase::Paying;
            }
            Payload::ItemFound => order.available = true,
            Payload::PriceQuote(price) => {
                order.price = Some(price);
                ctx.phase = CustomerPhase::Paying;
            }
            Payload::Ready => order.ready = true,
            other => debug!(agent = %ctx.id, payload = ?other, "ignored"),
        }
        Ok(ctx)
    }

    fn auto_mode(&self, mut ctx: Ctx, io: &mut RoleIo<'_>) -> AgentResult<Ctx> {
        let who = self.label(ctx.id);

        match ctx.phase {
            CustomerPhase::Idle => {
                if ctx.order.as_ref().is_some_and(|o| o.paid && o.ready) {
                    info!("{who}: I am heading to pickup counter");
                    ctx.phase = CustomerPhase::MoveToPickupCounter;
                }
            }

            CustomerPhase::MoveToOrderCounter => {
                if io.travel(&io.layout.customer_order_counter.goal()) {
                    ctx.phase = CustomerPhase::AtOrderCounter;
                }
            }

            CustomerPhase::AtOrderCounter => {
                let item = ctx.order.as_ref().map(|o| o.item.clone()).unwrap_or_default();
                let line = order_line(&item, ctx.id)?;
                info!("{who}: Hi Staff, I would like to order {item}");
                io.send(ChannelId::STAFF, &Payload::Item(line));
                info!("{who}: *waiting to pay*");
                ctx.phase = CustomerPhase::Idle;
            }

            CustomerPhase::Paying => {
                let balance = ctx.balance;
                let affordable = ctx
                    .order
                    .as_ref()
                    .and_then(|o| if o.available { o.price } else { None })
                    .filter(|price| *price <= balance);

                match (affordable, ctx.order.as_mut()) {
                    (Some(price), Some(order)) => {
                        info!("{who}: *has enough money*, paying {price}");
                        order.paid = true;
                        ctx.balance -= price;
                        io.store.set_balance(ctx.id, ctx.balance);
                        io.send(ChannelId::STAFF, &Payload::PaymentConfirmed);
                        ctx.phase = CustomerPhase::Idle;
                    }
                    _ => {
                        info!("{who}: Oops, I will cancel the order");
                        io.send(ChannelId::STAFF, &Payload::PaymentDeclined);
                        ctx.phase = CustomerPhase::MoveToStart;
                    }
                }
            }

            CustomerPhase::MoveToPickupCounter => {
                if io.travel(&io.layout.customer_pickup_counter.goal()) {
                    ctx.phase = CustomerPhase::PickingUp;
                }
            }

            CustomerPhase::PickingUp => {
                if let Some(order) = &ctx.order {
                    info!("{who}: I got my {}", order.item);
                }
                io.send(ChannelId::STAFF, &Payload::Ready);
                info!("{who}: I am returning to starting point");
                ctx.phase = CustomerPhase::MoveToStart;
            }

            CustomerPhase::MoveToStart => {
                if io.travel(&io.home_goal()) {
                    ctx.order = None;
                    io.send(ChannelId::DIRECTOR, &Payload::OrderComplete);
                    ctx.phase = CustomerPhase::Idle;
                }
            }
        }
        Ok(ctx)
    }

    fn remote_command(&self, key: Key) -> Option<RemoteCommand> {
        match key.normalized() {
            Key::Char('w') => Some(RemoteCommand::Forward),
            Key::Char('a') => Some(RemoteCommand::TurnLeft),
            Key::Char('s') => Some(RemoteCommand::Backward),
            Key::Char('d') => Some(RemoteCommand::TurnRight),
            _ => common_command(key),
        }
    }
}
