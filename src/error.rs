//! Crate error type
//!
//! The simulation itself never fails; errors only come from the platform
//! layer and from loading settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Terminal or other platform I/O failed
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings parsed but describe an unplayable game
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
