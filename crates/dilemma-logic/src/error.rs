//! Engine error codes

use thiserror::Error;

/// Every failure the engine can raise.
///
/// All of them are detected synchronously and none is retried: the
/// simulation is deterministic, so running the same call again would
/// fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DilemmaError {
    /// Malformed payoff table (missing or duplicated combination, wrong shape)
    #[error("Invalid payoff table: {0}")]
    Configuration(String),

    /// Out-of-range probability, negative iteration or window count
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Round robin attempted with fewer than two registered strategies
    #[error("Round robin needs at least 2 strategies, {registered} registered")]
    InsufficientParticipants { registered: usize },

    /// A choice outside {Silent, Confess}
    #[error("Choice invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, DilemmaError>;
