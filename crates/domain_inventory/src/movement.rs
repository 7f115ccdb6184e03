//! Stock movement types and availability checks

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{DocumentRef, ProductId, StockMovementId};

use crate::error::InventoryError;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockDirection {
    /// Goods received (purchase)
    In,
    /// Goods shipped (sale)
    Out,
}

/// One stock movement, tied to the document that caused it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Unique identifier
    pub id: StockMovementId,
    /// Product moved
    pub product_id: ProductId,
    /// In or out
    pub direction: StockDirection,
    /// Quantity (always positive)
    pub quantity: Decimal,
    /// Document this movement belongs to; shared with exactly one posting
    pub reference: DocumentRef,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn new(
        product_id: ProductId,
        direction: StockDirection,
        quantity: Decimal,
        reference: DocumentRef,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: StockMovementId::new_v7(),
            product_id,
            direction,
            quantity,
            reference,
            created_at,
        }
    }

    /// The quantity as it enters the on-hand sum
    pub fn signed_quantity(&self) -> Decimal {
        match self.direction {
            StockDirection::In => self.quantity,
            StockDirection::Out => -self.quantity,
        }
    }
}

/// On-hand quantity implied by a product's movement history
pub fn on_hand_of(movements: &[StockMovement]) -> Decimal {
    movements.iter().map(StockMovement::signed_quantity).sum()
}

/// Validates that an outflow fits into the available quantity
pub fn ensure_available(
    product_id: ProductId,
    on_hand: Decimal,
    requested: Decimal,
) -> Result<(), InventoryError> {
    if requested <= Decimal::ZERO {
        return Err(InventoryError::InvalidQuantity(requested));
    }
    if requested > on_hand {
        return Err(InventoryError::InsufficientStock {
            product: product_id,
            requested,
            on_hand,
        });
    }
    Ok(())
}
