//! # Validation Module
//!
//! Input validation for Vela POS requests.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: HTTP deserialization (serde) - shape and types
//! Layer 2: THIS MODULE                  - business rule validation
//! Layer 3: Database constraints         - NOT NULL, CHECK(stock >= 0), FKs
//!
//! Multiple layers catch different errors.
//! ```
//!
//! Checkout validation runs before the transaction opens, so a malformed
//! request never touches storage.

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutRequest, ProductInput};
use crate::{MAX_CHECKOUT_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout Validation
// =============================================================================

/// Validates a checkout request before it reaches the transaction engine.
///
/// ## Rules
/// - Must contain at least one line item (an empty checkout is rejected
///   rather than committing a zero-value order)
/// - At most [`MAX_CHECKOUT_LINES`] line items
/// - Every quantity must be positive and at most [`MAX_LINE_QUANTITY`]
///
/// ## Example
/// ```rust
/// use vela_core::types::{CheckoutItem, CheckoutRequest};
/// use vela_core::validation::validate_checkout;
///
/// let request = CheckoutRequest {
///     items: vec![CheckoutItem { product_id: 1, quantity: 2 }],
/// };
/// assert!(validate_checkout(&request).is_ok());
///
/// let empty = CheckoutRequest { items: vec![] };
/// assert!(validate_checkout(&empty).is_err());
/// ```
pub fn validate_checkout(request: &CheckoutRequest) -> ValidationResult<()> {
    if request.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if request.items.len() > MAX_CHECKOUT_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_CHECKOUT_LINES as i64,
        });
    }

    for item in &request.items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// CRUD Input Validation
// =============================================================================

/// Validates a product create/update payload.
///
/// ## Rules
/// - Name must not be empty and at most 200 characters
/// - Price must be non-negative (zero is allowed for free items)
/// - Stock must be non-negative
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name, 200)?;

    if input.price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if input.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a category create/update payload.
pub fn validate_category_input(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name, 100)?;

    if input.description.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }

    Ok(())
}

fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
