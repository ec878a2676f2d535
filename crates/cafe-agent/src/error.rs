use cafe_ledger::LedgerError;
use cafe_motion::MotionError;
use cafe_radio::RadioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Radio(#[from] RadioError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("unknown mode code {0}")]
    UnknownMode(u8),
}

pub type AgentResult<T> = Result<T, AgentError>;
