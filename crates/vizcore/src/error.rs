use thiserror::Error;

/// Errors raised while validating frame input, loading configuration or
/// acquiring rendering resources.
#[derive(Debug, Error)]
pub enum VizError {
    /// The flat state vector is shorter than its layout requires.
    #[error("state vector has {actual} values, layout needs at least {expected}")]
    StateTooShort { expected: usize, actual: usize },

    #[error("{actions} action values given for {motors} motors")]
    MotorActionMismatch { motors: usize, actions: usize },

    /// Target lists are flattened (x, y) pairs, so the length must be even.
    #[error("target list has odd length {0}")]
    OddTargetList(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to load font: {0}")]
    Font(String),

    #[error("display backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, VizError>;
