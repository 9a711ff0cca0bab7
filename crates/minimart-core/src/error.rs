//! # Error Types
//!
//! Domain error types for minimart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  minimart-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  minimart-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  apps/server errors                                                     │
//! │  └── ApiError         - HTTP status + JSON body the client sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design
//! Each boundary carries a tagged variant so the HTTP layer can map a
//! failure to a status code without matching on message text.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found by surrogate id or barcode.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale cannot be found.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// A stock decrement during checkout matched no product row.
    ///
    /// The whole checkout rolls back when this is raised. Note the check is
    /// existence-only: a row that exists is decremented even past zero.
    #[error("Stock error for product {product_id}")]
    StockError { product_id: i64 },

    /// Checkout or import called with an empty line list.
    #[error("{operation} requires at least one line")]
    EmptyLineList { operation: &'static str },

    /// Line list exceeds the accepted maximum.
    #[error("{operation} accepts at most {max} lines, got {got}")]
    TooManyLines {
        operation: &'static str,
        max: usize,
        got: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (unknown period name, malformed code, ...).
    #[error("{field} has invalid value: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

/// Convenience alias for Results carrying a CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CoreError::StockError { product_id: 42 };
        assert_eq!(err.to_string(), "Stock error for product 42");

        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn validation_converts_to_core_error() {
        let err: CoreError = ValidationError::MustBePositive { field: "qty" }.into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
