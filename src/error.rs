use thiserror::Error;

/// Outcome of a rejected signup, or a store that could not be reached.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Activity not found")]
    NotFound,

    #[error("Activity is full")]
    CapacityExceeded,

    #[error("Student is already signed up")]
    AlreadyEnrolled,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
}

impl SignupError {
    /// Short code used in redirect notices and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            SignupError::NotFound => "not_found",
            SignupError::CapacityExceeded => "full",
            SignupError::AlreadyEnrolled => "already_enrolled",
            SignupError::StorageUnavailable(_) => "error",
        }
    }
}

/// Signup payload that failed validation before reaching the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Activity name must not be empty")]
    InvalidActivityName,

    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),
}
