use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment name must be provided")]
    MissingEnvironmentName,

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("invalid action {action}, expected 0..{num_actions}")]
    InvalidAction { action: i64, num_actions: usize },

    #[error("invalid grid position ({row}, {column})")]
    InvalidPosition { row: usize, column: usize },

    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("torch error: {0}")]
    Torch(#[from] tch::TchError),
}

pub type Result<T> = std::result::Result<T, Error>;
