//! Top-level robot mode.

/// What a robot does with each tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentMode {
    /// Waits for a mode change.
    #[default]
    Idle,
    /// Driven by the keyboard.
    Remote,
    /// Runs the ordering protocol.
    Auto,
    /// Absorbing; the robot stops for good.
    Terminated,
}

impl AgentMode {
    /// Decode a mode-change payload.  Codes other than 0, 2, 4, 6 are unknown.
    pub fn from_wire(code: u8) -> Option<AgentMode> {
        match code {
            0 => Some(AgentMode::Idle),
            2 => Some(AgentMode::Remote),
            4 => Some(AgentMode::Auto),
            6 => Some(AgentMode::Terminated),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            AgentMode::Idle       => 0,
            AgentMode::Remote     => 2,
            AgentMode::Auto       => 4,
            AgentMode::Terminated => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentMode::Idle       => "idle",
            AgentMode::Remote     => "remote",
            AgentMode::Auto       => "auto",
            AgentMode::Terminated => "terminated",
        }
    }
}
