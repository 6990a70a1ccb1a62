use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::JsonResponse;
use thiserror::Error;

use crate::database::StoreError;

/// Failures that end a request with a non-200 status.
///
/// Missing form fields are not errors at this level; handlers answer them
/// with a 200 error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Details stay in the logs; clients only see the fixed message.
    #[error("Storage failure")]
    Storage(#[source] StoreError),

    #[error("Invalid search pattern: {0}")]
    InvalidSearch(String),

    #[error("Malformed form data: {0}")]
    MalformedForm(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidPattern(reason) => ApiError::InvalidSearch(reason),
            other => ApiError::Storage(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidSearch(_) | ApiError::MalformedForm(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(err) = self {
            tracing::error!("Request failed: {}", err);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        HttpResponse::build(self.status_code()).json(JsonResponse::error(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_maps_to_bad_request() {
        let err = ApiError::from(StoreError::InvalidPattern("unclosed group".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_failure_maps_to_server_error() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Storage failure");
    }

    #[actix_web::test]
    async fn test_storage_envelope_hides_database_details() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::Protocol(
            "password authentication failed for user postgres".to_string(),
        )));

        let body = actix_web::body::to_bytes(err.error_response().into_body())
            .await
            .unwrap();
        let envelope: JsonResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope, JsonResponse::error("Storage failure"));
    }
}
