//! Radio channel numbers.

use std::fmt;

use cafe_core::AgentId;

/// A radio channel.  Robots listen on their own id; the director listens on
/// [`ChannelId::DIRECTOR`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChannelId(pub i32);

impl ChannelId {
    /// Reaches every registered receiver except the sender.
    pub const BROADCAST: ChannelId = ChannelId(-1);
    pub const STAFF:     ChannelId = ChannelId(5);
    pub const DIRECTOR:  ChannelId = ChannelId(6);

    #[inline]
    pub fn is_broadcast(self) -> bool {
        self == Self::BROADCAST
    }
}

impl From<AgentId> for ChannelId {
    fn from(id: AgentId) -> Self {
        ChannelId(id.0 as i32)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_broadcast() {
            f.write_str("broadcast")
        } else {
            write!(f, "channel {}", self.0)
        }
    }
}
