//! Error Types for the Metrics and Recommendation Core
//!
//! Every failure here is a contract violation by the caller (the excluded
//! data-fetch/UI layers) and is recoverable there. The core never logs,
//! retries, or performs side effects on the error path.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Basket {0} has no allocation band entry")]
    UnmappedBasket(String),

    #[error("Division by zero in {0}")]
    DivideByZero(&'static str),
}
