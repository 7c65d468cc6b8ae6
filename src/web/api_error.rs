use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::{RequestError, SignupError};

/// JSON error body for the API routes: `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Request(RequestError),
    Signup(SignupError),
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        ApiError::Signup(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Signup(SignupError::StorageUnavailable(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Request(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Signup(SignupError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Signup(SignupError::AlreadyEnrolled) => StatusCode::BAD_REQUEST,
            ApiError::Signup(SignupError::CapacityExceeded) => StatusCode::CONFLICT,
            ApiError::Signup(SignupError::StorageUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Request(e) => e.to_string(),
            ApiError::Signup(SignupError::StorageUnavailable(e)) => {
                error!(error = %e, "storage unavailable");
                "Storage unavailable".to_string()
            }
            ApiError::Signup(e) => e.to_string(),
        };
        (self.status(), Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_outcomes_to_distinct_statuses() {
        assert_eq!(ApiError::from(SignupError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(SignupError::AlreadyEnrolled).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SignupError::CapacityExceeded).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(sqlx::Error::PoolTimedOut).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(RequestError::InvalidActivityName).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
