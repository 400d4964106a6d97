//! HTTP error mapping.
//!
//! Validation, not-found and ambiguity failures answer 400; store failures
//! answer 500. The body is always `{"error": "<message>"}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clerk_core::{DbError, ErrorCategory, RepoError, SearchError};
use log::{error, warn};
use serde::Serialize;
use tokio::task::JoinError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_category(category: ErrorCategory, message: String) -> Self {
        match category {
            ErrorCategory::NotFound | ErrorCategory::Validation => Self::bad_request(message),
            ErrorCategory::Store => Self::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                "event=http_error module=api status=error http_status={}",
                self.status.as_u16()
            );
        } else {
            warn!(
                "event=http_error module=api status=rejected http_status={}",
                self.status.as_u16()
            );
        }
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::from_category(value.category(), value.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(value: SearchError) -> Self {
        Self::from_category(value.category(), value.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::internal(value.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::internal(format!("store task failed: {value}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::bad_request(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::bad_request(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use clerk_core::{resolve, DbError, RepoError};

    #[test]
    fn repo_errors_map_by_category() {
        let not_found = ApiError::from(RepoError::NotFound(resolve("#4")));
        assert_eq!(not_found.status(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found.message(), "no entry matches #4");

        let ambiguous = ApiError::from(RepoError::Ambiguous {
            reference: resolve("dup"),
            matches: 2,
        });
        assert_eq!(ambiguous.status(), StatusCode::BAD_REQUEST);

        let store = ApiError::from(RepoError::Db(DbError::Poisoned));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
