use thiserror::Error;

/// Failures surfaced by the planner core.
///
/// `RequestFailed` and `Transport` display as their bare message because the
/// coordinator shows that text to the user unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The Planning Service answered with a non-success status.
    #[error("{0}")]
    RequestFailed(String),

    /// The call could not complete or the body was not valid JSON.
    #[error("{0}")]
    Transport(String),

    #[error("A trip plan request is already in progress")]
    SubmissionInProgress,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
