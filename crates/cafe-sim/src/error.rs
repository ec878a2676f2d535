use cafe_agent::AgentError;
use cafe_core::AgentId;
use cafe_radio::RadioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{0} is registered twice")]
    DuplicateAgent(AgentId),

    #[error("customer id {0} must be a single digit not used by staff or the director")]
    InvalidCustomerId(AgentId),

    #[error("expected exactly one staff robot, found {0}")]
    StaffCount(usize),

    #[error("no simulated body for {0}")]
    MissingBody(AgentId),

    #[error("bad key script entry {0:?} (expected tick:key)")]
    KeyScript(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Radio(#[from] RadioError),
}

pub type SimResult<T> = Result<T, SimError>;
