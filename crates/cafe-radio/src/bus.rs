//! In-process radio shared by every agent in a run.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{ChannelId, Mailbox, Message, Payload, RadioError, RadioResult};

/// What an agent sees of the radio: its own receiver plus a transmitter that
/// can address any channel.
pub trait Radio {
    /// The channel this radio receives on.
    fn channel(&self) -> ChannelId;

    /// Queue raw text for `to`.  Never blocks, never fails.
    fn send_text(&mut self, to: ChannelId, text: String);

    /// Oldest undelivered payload on this channel, if any.  Removes it.
    fn receive(&mut self) -> Option<String>;

    /// Payloads waiting on this channel.
    fn pending(&self) -> usize;

    fn send(&mut self, to: ChannelId, payload: &Payload) {
        self.send_text(to, payload.encode());
    }
}

/// Mailboxes for every registered channel plus the messages sent this tick.
#[derive(Debug, Default)]
pub struct RadioBus {
    mailboxes: BTreeMap<ChannelId, Mailbox>,
    in_flight: Vec<Message>,
}

impl RadioBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the mailbox for `channel`.
    pub fn register(&mut self, channel: ChannelId) -> RadioResult<()> {
        if channel.is_broadcast() || self.mailboxes.contains_key(&channel) {
            return Err(RadioError::ChannelTaken(channel));
        }
        self.mailboxes.insert(channel, Mailbox::new());
        Ok(())
    }

    /// Borrow the radio for the agent listening on `channel`.
    pub fn port(&mut self, channel: ChannelId) -> RadioResult<RadioPort<'_>> {
        if !self.mailboxes.contains_key(&channel) {
            return Err(RadioError::UnknownChannel(channel));
        }
        Ok(RadioPort { bus: self, channel })
    }

    /// Messages sent this tick that are not yet delivered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Payloads waiting in `channel`'s mailbox.
    pub fn queued(&self, channel: ChannelId) -> usize {
        self.mailboxes.get(&channel).map_or(0, Mailbox::len)
    }

    /// Move every in-flight message into its receivers' mailboxes.
    ///
    /// Called once at the end of each tick.  Returns the number of mailbox
    /// deliveries (a broadcast counts once per receiver).  Messages to
    /// channels with no receiver are dropped.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        for msg in std::mem::take(&mut self.in_flight) {
            if msg.to.is_broadcast() {
                for (channel, mailbox) in self.mailboxes.iter_mut() {
                    if *channel != msg.from {
                        mailbox.push(msg.payload.clone());
                        delivered += 1;
                    }
                }
            } else if let Some(mailbox) = self.mailboxes.get_mut(&msg.to) {
                mailbox.push(msg.payload);
                delivered += 1;
            } else {
                debug!(to = %msg.to, payload = %msg.payload, "no receiver; message dropped");
            }
        }
        delivered
    }
}

/// One agent's handle on the bus, valid for a single step.
pub struct RadioPort<'a> {
    bus:     &'a mut RadioBus,
    channel: ChannelId,
}

impl Radio for RadioPort<'_> {
    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn send_text(&mut self, to: ChannelId, text: String) {
        trace!(from = %self.channel, to = %to, payload = %text, "send");
        self.bus.in_flight.push(Message { from: self.channel, to, payload: text });
    }

    fn receive(&mut self) -> Option<String> {
        self.bus.mailboxes.get_mut(&self.channel).and_then(Mailbox::pop)
    }

    fn pending(&self) -> usize {
        self.bus.queued(self.channel)
    }
}
