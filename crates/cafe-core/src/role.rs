//! The part an agent plays in the café.

/// Which state machine an agent runs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Orders, pays, and picks up.
    Customer,
    /// Checks the menu, takes payment, prepares and serves.
    Staff,
    /// Dispatches orders and switches robots between modes.
    Director,
}

impl Role {
    /// Human-readable label, used in log lines and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff    => "staff",
            Role::Director => "director",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
