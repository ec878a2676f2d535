//! Scripted keyboard input: at most one key per tick.

use std::collections::BTreeMap;
use std::str::FromStr;

use cafe_agent::Key;
use cafe_core::Tick;

use crate::SimError;

/// Keys to press, indexed by tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyScript {
    keys: BTreeMap<Tick, Key>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `key` at `tick`, replacing any key already scheduled there.
    pub fn press(mut self, tick: Tick, key: Key) -> Self {
        self.keys.insert(tick, key);
        self
    }

    pub fn key_at(&self, tick: Tick) -> Option<Key> {
        self.keys.get(&tick).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Last tick with a key, if any.
    pub fn last_tick(&self) -> Option<Tick> {
        self.keys.keys().next_back().copied()
    }
}

/// Parses `tick:key` pairs separated by commas, e.g. `"0:a, 40:up, 90:space"`.
///
/// A key is a single character or one of `up`, `down`, `left`, `right`,
/// `space`.
impl FromStr for KeyScript {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut script = KeyScript::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let bad = || SimError::KeyScript(entry.to_owned());
            let (tick, key) = entry.split_once(':').ok_or_else(bad)?;
            let tick = tick.trim().parse::<u64>().map_err(|_| bad())?;
            let key = parse_key(key.trim()).ok_or_else(bad)?;
            script = script.press(Tick(tick), key);
        }
        Ok(script)
    }
}

fn parse_key(name: &str) -> Option<Key> {
    match name.to_ascii_lowercase().as_str() {
        "up"    => Some(Key::Up),
        "down"  => Some(Key::Down),
        "left"  => Some(Key::Left),
        "right" => Some(Key::Right),
        "space" => Some(Key::Char(' ')),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}
