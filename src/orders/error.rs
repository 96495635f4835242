//! Error types for order drafting.

use thiserror::Error;

/// Errors that can occur while drafting or quoting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The draft has no customer.
    #[error("Please select a customer.")]
    MissingCustomer,

    /// The draft has no line items.
    #[error("Please add at least one product to the order.")]
    EmptyOrder,

    /// Shipping details are missing or non-positive.
    #[error("Missing shipping details: {0}")]
    InvalidShipping(String),

    /// The shipping quote could not be produced.
    #[error("Shipping estimate failed: {0}")]
    QuoteFailed(String),

    /// Customer details are invalid.
    #[error("Invalid customer: {0}")]
    InvalidCustomer(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OrderError {
    /// Whether the admin can fix this by editing the form.
    #[must_use]
    pub const fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::MissingCustomer
                | Self::EmptyOrder
                | Self::InvalidShipping(_)
                | Self::InvalidCustomer(_)
        )
    }
}

/// Convenience result alias for order operations.
pub type OrderResult<T> = Result<T, OrderError>;
