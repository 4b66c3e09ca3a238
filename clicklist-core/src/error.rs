//! Core error types for `ClickList`.

use thiserror::Error;

/// Core error type for `ClickList` model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity is not a positive whole number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Price field is missing or not a finite number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
