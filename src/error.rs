/// Errors reported back to a client as a single `ERROR: ...` line
///
/// None of these touch shared state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid WATCH command format")]
    InvalidWatch,

    #[error("Invalid RECOMMEND_FOR_VIDEO command format")]
    InvalidRecommendForVideo,

    #[error("Unrecognized command")]
    Unrecognized,

    #[error("Command exceeds maximum length")]
    TooLong,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
