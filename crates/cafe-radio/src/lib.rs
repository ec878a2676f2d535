//! `cafe-radio` — the messaging channel between café agents.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`channel`]   | `ChannelId` and the fixed channel assignments                |
//! | [`message`]   | `Payload` codec, `Message`, order-line helpers               |
//! | [`mailbox`]   | `Mailbox` — FIFO inbound queue for one channel               |
//! | [`bus`]       | `Radio` trait, `RadioBus`, `RadioPort`                       |
//! | [`error`]     | `RadioError`, `RadioResult<T>`                               |
//!
//! # Delivery model
//!
//! Sends are fire-and-forget.  A message sent during tick *t* sits in the
//! bus's in-flight buffer until [`RadioBus::flush`] runs at the end of the
//! tick, so every receiver sees it at tick *t + 1* regardless of the order in
//! which agents were stepped.  Delivery is reliable and FIFO per channel.

pub mod bus;
pub mod channel;
pub mod error;
pub mod mailbox;
pub mod message;


pub use bus::{Radio, RadioBus, RadioPort};
pub use channel::ChannelId;
pub use error::{RadioError, RadioResult};
pub use mailbox::Mailbox;
pub use message::{Message, Payload, order_line, split_order_line};
