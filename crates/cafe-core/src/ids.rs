//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  The inner integer is `pub`; prefer the helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id! {
    /// Robot identifier.  Customers are `1..=4`, the staff robot is `5`; the
    /// id doubles as the robot's radio channel.
    pub struct AgentId(u8);
}

typed_id! {
    /// Sequence number of a settled sale in the staff account log.
    pub struct OrderNo(u32);
}

impl AgentId {
    /// The staff robot's fixed id.
    pub const STAFF: AgentId = AgentId(5);

    /// Parse a single ASCII digit (`'0'..='9'`) into an id.
    pub fn from_digit(c: char) -> Option<AgentId> {
        c.to_digit(10).map(|d| AgentId(d as u8))
    }

    /// The id as a single ASCII digit, or `None` for ids above 9.
    pub fn to_digit(self) -> Option<char> {
        char::from_digit(self.0 as u32, 10)
    }
}

impl OrderNo {
    /// The opening row of an account log.
    pub const OPENING: OrderNo = OrderNo(0);

    #[inline]
    pub fn next(self) -> OrderNo {
        OrderNo(self.0 + 1)
    }
}
