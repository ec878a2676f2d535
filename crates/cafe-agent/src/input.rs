//! Keyboard events and the manual-driving command set.

/// One keypress.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Letters compare case-insensitively.
    pub fn normalized(self) -> Key {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }

    /// `true` for `Char(c)` matching `c` case-insensitively.
    pub fn is_char(self, c: char) -> bool {
        self.normalized() == Key::Char(c.to_ascii_lowercase())
    }
}

/// A manual-driving action.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RemoteCommand {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    SpeedUp,
    SpeedDown,
    Halt,
    /// Halt and terminate.
    Exit,
}

/// Keys every robot understands: `x`, `z`, space, `e`.
pub fn common_command(key: Key) -> Option<RemoteCommand> {
    match key.normalized() {
        Key::Char('x') => Some(RemoteCommand::SpeedUp),
        Key::Char('z') => Some(RemoteCommand::SpeedDown),
        Key::Char(' ') => Some(RemoteCommand::Halt),
        Key::Char('e') => Some(RemoteCommand::Exit),
        _ => None,
    }
}
