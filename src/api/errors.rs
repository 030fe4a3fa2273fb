use crate::api::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Failure answered by the backend as `{"error": ...}` with a matching status
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::EmptyName => StatusCode::BAD_REQUEST,
            StoreError::DuplicateName(_) => StatusCode::CONFLICT,
            StoreError::InvalidDefinition(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        api_error(status, err.to_string())
    }
}

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    ApiError {
        error: message.into(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let conflict = ApiError::from(StoreError::DuplicateName("Intake".into()));
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert!(conflict.error.contains("Intake"));
        assert_eq!(
            ApiError::from(StoreError::NotFound).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::InvalidDefinition("steps".into())).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn body_carries_only_the_message() {
        let body = serde_json::to_value(api_error(StatusCode::BAD_REQUEST, "bad")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "bad" }));
    }
}
