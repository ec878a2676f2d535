//! Payload codec.
//!
//! Every payload is a short string.  Its first character selects the event:
//!
//! | Text             | Event                      |
//! |------------------|----------------------------|
//! | digit string     | set the receiver's mode    |
//! | `?`              | print balance              |
//! | `~`              | terminate                  |
//! | `-` / `+`        | item not found / found     |
//! | `$<price>`       | price quote                |
//! | `*`              | order ready / picked up    |
//! | `<` / `>`        | payment declined / paid    |
//! | `Order Complete` | cycle acknowledgement      |
//! | anything else    | order item text            |
//!
//! Single-character sentinels match on the first character only; trailing
//! text after them is ignored.

use std::fmt;

use cafe_core::{AgentId, Money};

use crate::{ChannelId, RadioError, RadioResult};

/// Literal acknowledgement a customer sends the director after a cycle.
pub const ORDER_COMPLETE: &str = "Order Complete";

/// A decoded radio payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Raw mode wire code (`0`, `2`, `4`, `6`, ...).
    SetMode(u8),
    PrintBalance,
    Terminate,
    ItemNotFound,
    ItemFound,
    PriceQuote(Money),
    /// `*`: "order ready" toward a customer, "picked up" toward staff.
    Ready,
    PaymentDeclined,
    PaymentConfirmed,
    OrderComplete,
    /// Free text: an item name, or `<item><customer digit>` toward staff.
    Item(String),
}

impl Payload {
    /// Parse a received payload.
    pub fn decode(text: &str) -> RadioResult<Payload> {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return Err(RadioError::decode(text, "empty payload"));
        };

        if first.is_ascii_digit() {
            return text
                .parse::<u8>()
                .map(Payload::SetMode)
                .map_err(|_| RadioError::decode(text, "mode change must be a small integer"));
        }

        let payload = match first {
            '?' => Payload::PrintBalance,
            '~' => Payload::Terminate,
            '-' => Payload::ItemNotFound,
            '+' => Payload::ItemFound,
            '*' => Payload::Ready,
            '<' => Payload::PaymentDeclined,
            '>' => Payload::PaymentConfirmed,
            '$' => {
                let price = chars
                    .as_str()
                    .parse::<Money>()
                    .map_err(|e| RadioError::decode(text, e.to_string()))?;
                if price < Money::ZERO {
                    return Err(RadioError::decode(text, "price must be non-negative"));
                }
                Payload::PriceQuote(price)
            }
            _ if text == ORDER_COMPLETE => Payload::OrderComplete,
            _ => Payload::Item(text.to_owned()),
        };
        Ok(payload)
    }

    /// Wire text for this payload.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::SetMode(code)     => write!(f, "{code}"),
            Payload::PrintBalance      => f.write_str("?"),
            Payload::Terminate         => f.write_str("~"),
            Payload::ItemNotFound      => f.write_str("-"),
            Payload::ItemFound         => f.write_str("+"),
            Payload::PriceQuote(price) => write!(f, "${price}"),
            Payload::Ready             => f.write_str("*"),
            Payload::PaymentDeclined   => f.write_str("<"),
            Payload::PaymentConfirmed  => f.write_str(">"),
            Payload::OrderComplete     => f.write_str(ORDER_COMPLETE),
            Payload::Item(text)        => f.write_str(text),
        }
    }
}

/// A payload in flight between two channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub from:    ChannelId,
    pub to:      ChannelId,
    pub payload: String,
}

/// `<item><customer digit>`, the line a customer sends the staff robot.
pub fn order_line(item: &str, customer: AgentId) -> RadioResult<String> {
    let digit = customer
        .to_digit()
        .ok_or_else(|| RadioError::decode(item, format!("{customer} has no single-digit channel")))?;
    Ok(format!("{item}{digit}"))
}

/// Split `<item><customer digit>` back into its parts.
pub fn split_order_line(line: &str) -> RadioResult<(String, AgentId)> {
    let mut chars = line.chars();
    let customer = chars
        .next_back()
        .and_then(AgentId::from_digit)
        .ok_or_else(|| RadioError::decode(line, "order line must end with a customer digit"))?;
    let item = chars.as_str();
    if item.is_empty() {
        return Err(RadioError::decode(line, "order line has no item"));
    }
    Ok((item.to_owned(), customer))
}
