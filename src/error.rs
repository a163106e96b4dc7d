use thiserror::Error;

/// Errors caught before anything is sent to the backend.
///
/// The `Display` text is the message shown next to the offending form field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a valid positive amount")]
    InvalidAmount,

    /// Reduce more than is currently saved.
    #[error("Cannot withdraw more than current savings (₱{limit})")]
    ExceedsSavings { limit: String },

    /// Add more than is left to reach the target.
    #[error("Cannot add more than remaining goal amount (₱{limit})")]
    ExceedsRemaining { limit: String },

    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be less than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid date")]
    InvalidDate,

    #[error("{0} must not be in the past")]
    PastDate(&'static str),

    #[error("Cannot change a {from} goal: {reason}")]
    InvalidTransition { from: String, reason: &'static str },

    #[error("Only items on hold can be {0}")]
    ItemNotOnHold(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced from a backend call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// A non-2xx response. `message` is the server's `error` field.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors from the durable key/value store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("storage is not available: {0}")]
    Unavailable(String),

    #[error("could not write key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("stored value for {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
