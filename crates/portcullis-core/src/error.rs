use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A task was built with a shape the executor cannot run.
    #[error("Invalid task: {reason}")]
    InvalidTask { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown subsystem: {0}")]
    UnknownSubsystem(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl Error {
    /// Create a new invalid task error.
    pub fn invalid_task(reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
