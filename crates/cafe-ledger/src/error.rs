use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Lookup miss.  Callers treat a menu miss as a protocol branch.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// A backing file is missing or unreadable.  Fatal at startup.
    #[error("record store {} unavailable: {source}", path.display())]
    Unavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
