//! # API Error Types
//!
//! The outermost rung of the error ladder:
//! ```text
//! ValidationError ─┐
//! CoreError ───────┼──► ApiError ──► HTTP status + JSON body
//! DbError ─────────┘
//! ```
//!
//! ## Wire format
//! Every failure serializes as
//! ```json
//! { "success": false, "error": "name is required", "code": "VALIDATION_ERROR" }
//! ```
//! so clients branch on `code`, never on message text.
//!
//! ## Status mapping
//! | Variant       | Status | Code                  |
//! |---------------|--------|-----------------------|
//! | `Validation`  | 400    | `VALIDATION_ERROR`    |
//! | `NotFound`    | 404    | `NOT_FOUND`           |
//! | `Conflict`    | 409    | `CONFLICT_ERROR`      |
//! | `Stock`       | 422    | `STOCK_ERROR`         |
//! | `Transaction` | 500    | `TRANSACTION_FAILURE` |
//! | `Database`    | 500    | `DATABASE_ERROR`      |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use minimart_core::{CoreError, ValidationError};
use minimart_db::DbError;

/// Machine-readable error category carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    ConflictError,
    StockError,
    TransactionFailure,
    DatabaseError,
}

/// API-level error, one variant per HTTP outcome.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or out-of-range input (400).
    #[error("{0}")]
    Validation(String),

    /// Entity does not exist (404).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness or foreign-key conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// A checkout stock decrement matched no product row (422). The whole
    /// sale was rolled back.
    #[error("Stock error for product {product_id}")]
    Stock { product_id: i64 },

    /// A multi-statement write failed and was rolled back (500).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Everything else from the storage layer (500).
    #[error("Database error: {0}")]
    Database(String),
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::ValidationError,
            ApiError::NotFound { .. } => ErrorCode::NotFound,
            ApiError::Conflict(_) => ErrorCode::ConflictError,
            ApiError::Stock { .. } => ErrorCode::StockError,
            ApiError::Transaction(_) => ErrorCode::TransactionFailure,
            ApiError::Database(_) => ErrorCode::DatabaseError,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Stock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Transaction(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body as the client sees it.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: ErrorCode,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            error!(%status, ?code, error = %self, "Request failed");
        } else {
            warn!(%status, ?code, error = %self, "Request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::NotFound {
                entity: "Product",
                id,
            },
            CoreError::SaleNotFound(id) => ApiError::NotFound {
                entity: "Sale",
                id,
            },
            CoreError::StockError { product_id } => ApiError::Stock { product_id },
            CoreError::EmptyLineList { .. } | CoreError::TooManyLines { .. } => {
                ApiError::Validation(err.to_string())
            }
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation(_) => {
                ApiError::Conflict(err.to_string())
            }
            DbError::StockError { product_id } => ApiError::Stock { product_id },
            DbError::TransactionFailed(msg) => ApiError::Transaction(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound {
                entity: "Product",
                id: "1".into()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Stock { product_id: 1 }.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn db_errors_map_to_api_variants() {
        let api: ApiError = DbError::StockError { product_id: 7 }.into();
        assert_eq!(api.code(), ErrorCode::StockError);

        let api: ApiError = DbError::not_found("Product", 3).into();
        assert_eq!(api.code(), ErrorCode::NotFound);

        let api: ApiError = DbError::QueryFailed("boom".into()).into();
        assert_eq!(api.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "\"VALIDATION_ERROR\"");
    }
}
