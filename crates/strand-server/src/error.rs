use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use strand_query::QueryError;
use strand_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error returned from a handler: a status code plus a JSON body of the
/// form `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let (status, code) = match &err {
            StoreError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input"),
            StoreError::DuplicateEntry(_) => (StatusCode::CONFLICT, "duplicate_entry"),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        };
        Self::new(status, code, err.to_string())
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let (status, code) = match &err {
            QueryError::InvalidFilterValue { .. } => {
                (StatusCode::BAD_REQUEST, "invalid_filter_value")
            }
            QueryError::UnparseableQuery(_) => (StatusCode::BAD_REQUEST, "unparseable_query"),
            QueryError::ConflictingFilters(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "conflicting_filters")
            }
            QueryError::InvalidPattern(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };
        Self::new(status, code, err.to_string())
    }
}
