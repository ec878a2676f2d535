use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("maximum wheel speed must be finite and positive, got {0}")]
    InvalidMaxSpeed(f64),
}

pub type MotionResult<T> = Result<T, MotionError>;
