use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use match_core::MatchError;
use serde_json::json;

/// Custom error type for API handlers
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Structured 422 for lineup and precondition failures
    Unprocessable { error: String, reason: String },
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Unprocessable { error, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": error, "reason": reason })),
            )
                .into_response(),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match &err {
            MatchError::Precondition(_) | MatchError::InvalidLineup(_) => ApiError::Unprocessable {
                error: err.code().to_string(),
                reason: err.reason(),
            },
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalError(format!("JSON error: {}", err))
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_errors_map_to_422() {
        let err: ApiError =
            MatchError::InvalidLineup("must contain exactly 1 GK".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_invariant_errors_map_to_500() {
        let err: ApiError = MatchError::Invariant("state diverged".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
