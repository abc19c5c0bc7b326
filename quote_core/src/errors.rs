//! # Error Types
//!
//! Structured error types for quote_core. Pricing itself never fails: bad
//! numeric input coerces to zero and an unresolvable price yields a zero
//! total. Errors come from catalog loading, misdirected edits and the export
//! write boundary.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_price(item: &str, price: f64) -> QuoteResult<()> {
//!     if !price.is_finite() || price < 0.0 {
//!         return Err(QuoteError::invalid_input(
//!             item,
//!             price.to_string(),
//!             "Price must be a non-negative number",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quoting operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (negative price, unknown category token, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Finish or accessory name not present in the catalog
    #[error("Catalog item not found: {name}")]
    CatalogItemNotFound { name: String },

    /// An edit addressed a category holding the other kind of row
    #[error("Category '{category}' holds {actual} rows, not {expected} rows")]
    WrongRowKind {
        category: String,
        expected: String,
        actual: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Workbook could not be built
    #[error("Export error: {reason}")]
    ExportError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CatalogItemNotFound error
    pub fn catalog_item_not_found(name: impl Into<String>) -> Self {
        QuoteError::CatalogItemNotFound { name: name.into() }
    }

    /// Create a WrongRowKind error
    pub fn wrong_row_kind(
        category: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        QuoteError::WrongRowKind {
            category: category.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::CatalogItemNotFound { .. } => "CATALOG_ITEM_NOT_FOUND",
            QuoteError::WrongRowKind { .. } => "WRONG_ROW_KIND",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::ExportError { .. } => "EXPORT_ERROR",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for QuoteError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        QuoteError::ExportError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_input("Handle", "-5", "Price must be a non-negative number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(QuoteError::catalog_item_not_found("Teak").error_code(), "CATALOG_ITEM_NOT_FOUND");
        assert_eq!(
            QuoteError::wrong_row_kind("wardrobe-wood", "attribute", "dimensional").error_code(),
            "WRONG_ROW_KIND"
        );
    }

    #[test]
    fn test_wrong_row_kind_message() {
        let error = QuoteError::wrong_row_kind("kitchen-acc", "dimensional", "attribute");
        assert_eq!(
            error.to_string(),
            "Category 'kitchen-acc' holds attribute rows, not dimensional rows"
        );
    }
}
