use thiserror::Error;

use crate::ChannelId;

#[derive(Debug, Error)]
pub enum RadioError {
    /// Inbound payload that cannot be interpreted (bad mode digits, bad
    /// price, order line without a customer digit).
    #[error("cannot decode payload {payload:?}: {reason}")]
    ProtocolDecode { payload: String, reason: String },

    #[error("no receiver registered on {0}")]
    UnknownChannel(ChannelId),

    #[error("{0} already has a receiver")]
    ChannelTaken(ChannelId),
}

impl RadioError {
    pub(crate) fn decode(payload: &str, reason: impl Into<String>) -> Self {
        RadioError::ProtocolDecode { payload: payload.to_owned(), reason: reason.into() }
    }
}

pub type RadioResult<T> = Result<T, RadioError>;
