//! Staff ordering protocol.
//!
//! ```text
//! "<item><id>" ──► MoveToOrderCounter ──► CheckingOrder ──("+" "$p" | "-")──► Idle
//! ">" ──► PlacingOrder ──(ledger row)──► Preparing ──(prep time)──► MoveToPickupCounter
//! MoveToPickupCounter ──► Serving ──("*" to customer)──► Idle
//! "*" with no order, or "<" ──► MoveToStart ──► Idle
//! ```

use cafe_core::{AgentId, Role};
use cafe_ledger::{AccountRow, LedgerError, RecordStore};
use cafe_radio::{ChannelId, Payload, split_order_line};
use tracing::{debug, error, info, warn};

use crate::{AgentContext, AgentResult, Key, Order, Phase, RemoteCommand, RoleBehavior, RoleIo, common_command};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum StaffPhase {
    #[default]
    Idle,
    MoveToOrderCounter,
    CheckingOrder,
    PlacingOrder,
    MoveToPickupCounter,
    Preparing,
    Serving,
    MoveToStart,
}

impl Phase for StaffPhase {
    fn as_str(self) -> &'static str {
        match self {
            StaffPhase::Idle                => "idle",
            StaffPhase::MoveToOrderCounter  => "move_to_order_counter",
            StaffPhase::CheckingOrder       => "checking_order",
            StaffPhase::PlacingOrder        => "placing_order",
            StaffPhase::MoveToPickupCounter => "move_to_pickup_counter",
            StaffPhase::Preparing           => "preparing",
            StaffPhase::Serving             => "serving",
            StaffPhase::MoveToStart         => "move_to_start",
        }
    }
}

/// The staff robot.  Drives with the arrow keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct Staff;

type Ctx = AgentContext<StaffPhase>;

impl RoleBehavior for Staff {
    type Phase = StaffPhase;

    fn role(&self) -> Role {
        Role::Staff
    }

    fn label(&self, _id: AgentId) -> String {
        "Staff".to_owned()
    }

    /// Record the opening balance as order 0.
    fn on_start(&self, ctx: &Ctx, store: &mut dyn RecordStore) -> AgentResult<()> {
        store.append_account(&AccountRow::opening(ctx.balance))?;
        Ok(())
    }

    fn process_data(&self, mut ctx: Ctx, payload: Payload, _io: &mut RoleIo<'_>) -> AgentResult<Ctx> {
        match payload {
            Payload::Item(line) => {
                let (item, customer) = split_order_line(&line)?;
                if let Some(current) = &ctx.order {
                    warn!(new = %item, %customer, current = %current.item, "staff busy; order ignored");
                    return Ok(ctx);
                }
                info!("Staff: I am heading to order counter to take {customer}'s order");
                ctx.order = Some(Order::new(item, customer));
                ctx.phase = StaffPhase::MoveToOrderCounter;
            }

            Payload::PaymentDeclined => {
                info!("Staff: order cancelled, returning to starting point");
                ctx.order = None;
                ctx.phase = StaffPhase::MoveToStart;
            }

            Payload::PaymentConfirmed => match ctx.order.as_mut() {
                Some(order) => {
                    order.paid = true;
                    ctx.phase = StaffPhase::PlacingOrder;
                }
                None => debug!("payment with no order in flight; ignored"),
            },

            Payload::Ready if ctx.order.is_none() => {
                info!("Staff: order picked up, returning to starting point");
                ctx.phase = StaffPhase::MoveToStart;
            }

            other => debug!(payload = ?other, "staff ignored payload"),
        }
        Ok(ctx)
    }

    fn auto_mode(&self, mut ctx: Ctx, io: &mut RoleIo<'_>) -> AgentResult<Ctx> {
        match ctx.phase {
            StaffPhase::Idle => {}

            StaffPhase::MoveToOrderCounter => {
                if io.travel(&io.layout.staff_order_station.goal()) {
                    ctx.phase = StaffPhase::CheckingOrder;
                }
            }

            StaffPhase::CheckingOrder => {
                let Some(order) = ctx.order.as_mut() else {
                    return Ok(ctx.with_phase(StaffPhase::Idle));
                };
                let to = ChannelId::from(order.customer);
                match io.store.menu_item(&order.item) {
                    Ok(menu) => {
                        info!("Staff: {} costs {}", menu.name, menu.price);
                        io.send(to, &Payload::ItemFound);
                        io.send(to, &Payload::PriceQuote(menu.price));
                        order.available    = true;
                        order.price        = Some(menu.price);
                        order.prep_time_ms = menu.prep_time_ms();
                    }
                    Err(LedgerError::RecordNotFound(_)) => {
                        info!("Staff: sorry, we do not have {}", order.item);
                        io.send(to, &Payload::ItemNotFound);
                        order.available = false;
                    }
                    Err(err) => return Err(err.into()),
                }
                ctx.phase = StaffPhase::Idle;
            }

            StaffPhase::PlacingOrder => {
                let Some(order) = ctx.order.as_ref() else {
                    return Ok(ctx.with_phase(StaffPhase::Idle));
                };
                let price = order.price.unwrap_or_default();
                let row = AccountRow {
                    order:    ctx.order_seq.next(),
                    item:     order.item.clone(),
                    customer: Some(order.customer),
                    balance:  ctx.balance + price,
                };
                info!("Staff: preparing {} for {}", order.item, order.customer);
                if let Err(err) = io.store.append_account(&row) {
                    error!(order = %row.order, error = %err, "account row not written");
                }
                ctx.order_seq = row.order;
                ctx.balance = row.balance;
                io.store.set_balance(ctx.id, ctx.balance);
                ctx.phase = StaffPhase::Preparing;
            }

            StaffPhase::Preparing => {
                if let Some(order) = ctx.order.as_mut() {
                    order.prep_elapsed_ms += u64::from(io.tick_ms);
                    if order.prep_elapsed_ms >= order.prep_time_ms {
                        info!("Staff: {} is ready, heading to pickup counter", order.item);
                        ctx.phase = StaffPhase::MoveToPickupCounter;
                    }
                }
            }

            StaffPhase::MoveToPickupCounter => {
                if io.travel(&io.layout.staff_pickup_station.goal()) {
                    ctx.phase = StaffPhase::Serving;
                }
            }

            StaffPhase::Serving => {
                if let Some(order) = ctx.order.take() {
                    info!("Staff: {} for {} is on the counter", order.item, order.customer);
                    io.send(ChannelId::from(order.customer), &Payload::Ready);
                }
                ctx.phase = StaffPhase::Idle;
            }

            StaffPhase::MoveToStart => {
                if io.travel(&io.home_goal()) {
                    ctx.phase = StaffPhase::Idle;
                }
            }
        }
        Ok(ctx)
    }

    fn remote_command(&self, key: Key) -> Option<RemoteCommand> {
        match key {
            Key::Up    => Some(RemoteCommand::Forward),
            Key::Down  => Some(RemoteCommand::Backward),
            Key::Left  => Some(RemoteCommand::TurnLeft),
            Key::Right => Some(RemoteCommand::TurnRight),
            Key::Char(_) => common_command(key),
        }
    }
}
