use thiserror::Error;

/// Failures of a single step of the review relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("branch {0} does not exist")]
    BranchNotFound(String),
    #[error("GitHub request failed")]
    GitHub(#[from] octocrab::Error),
    #[error("Slack request failed")]
    Http(#[from] reqwest::Error),
    #[error("user {0} does not exist")]
    UserNotFound(String),
    /// Slack answered with `ok: false`, the payload is the error code it reported.
    #[error("{0}")]
    MessageRejected(String),
}

pub type RelayResult<T> = Result<T, RelayError>;
