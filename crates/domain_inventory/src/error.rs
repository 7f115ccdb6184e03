//! Inventory domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ProductId, StoreError};

/// Errors that can occur in the inventory domain
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Quantities must be strictly positive
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(Decimal),

    /// Outflow beyond the available quantity
    #[error("Insufficient stock for {product}: requested {requested}, on hand {on_hand}")]
    InsufficientStock {
        product: ProductId,
        requested: Decimal,
        on_hand: Decimal,
    },

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
