//! Per-channel inbound queue.

use std::collections::VecDeque;

/// FIFO of undelivered payloads for one receiver.
#[derive(Debug, Default, Clone)]
pub struct Mailbox {
    queue: VecDeque<String>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, payload: String) {
        self.queue.push_back(payload);
    }

    /// Remove and return the oldest payload.
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
