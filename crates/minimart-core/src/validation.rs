//! # Input Validation
//!
//! Early checks on request payloads, run before any SQL.
//!
//! Malformed payloads fail here with typed errors instead of surfacing as
//! database constraint violations deep in a transaction. The rules stay
//! deliberately loose: a zero-quantity restock is a legal price/name update,
//! for instance.

use crate::error::ValidationError;
use crate::{MAX_CART_LINES, MAX_IMPORT_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name: non-empty after trimming, at most 200 chars.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }
    Ok(())
}

/// Validates a ledger description: non-empty after trimming.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description",
        });
    }
    Ok(())
}

/// Money amounts on products may be zero but never negative.
pub fn validate_amount_cents(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

/// Ledger amounts must be strictly positive.
pub fn validate_positive_cents(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(())
}

/// Restock/import quantities may be zero (a pure price/name update) but not
/// negative.
pub fn validate_restock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative { field: "quantity" });
    }
    Ok(())
}

/// Checkout quantities must be strictly positive.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "qty" });
    }
    Ok(())
}

/// Bounds check on a checkout line list.
pub fn validate_cart_size(lines: usize) -> ValidationResult<()> {
    bounded_lines("items", lines, MAX_CART_LINES)
}

/// Bounds check on a bulk import line list.
pub fn validate_import_size(lines: usize) -> ValidationResult<()> {
    bounded_lines("items", lines, MAX_IMPORT_LINES)
}

fn bounded_lines(field: &'static str, got: usize, max: usize) -> ValidationResult<()> {
    if got == 0 {
        return Err(ValidationError::Required { field });
    }
    if got > max {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: format!("at most {max} lines allowed, got {got}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_product_name("Cola 330ml").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn amount_rules() {
        assert!(validate_amount_cents("price", 0).is_ok());
        assert!(validate_amount_cents("price", -1).is_err());
        assert!(validate_positive_cents("amount", 1).is_ok());
        assert!(validate_positive_cents("amount", 0).is_err());
    }

    #[test]
    fn quantity_rules() {
        // Zero-quantity restock is a legal price/name update.
        assert!(validate_restock_quantity(0).is_ok());
        assert!(validate_restock_quantity(-1).is_err());
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
    }

    #[test]
    fn line_list_bounds() {
        assert!(validate_cart_size(1).is_ok());
        assert!(validate_cart_size(0).is_err());
        assert!(validate_cart_size(crate::MAX_CART_LINES + 1).is_err());
        assert!(validate_import_size(crate::MAX_IMPORT_LINES).is_ok());
    }
}
