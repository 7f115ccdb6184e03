//! Inventory store port

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{ProductId, StoreError};

use crate::movement::StockMovement;

/// Row access for stock movements
#[async_trait]
pub trait StockStore: Send {
    /// On-hand quantity of a product; zero for a product never moved
    async fn on_hand(&mut self, product_id: ProductId) -> Result<Decimal, StoreError>;

    async fn insert_stock_movement(&mut self, row: StockMovement) -> Result<(), StoreError>;

    /// Movement history of one product, in append order
    async fn stock_movements_of(
        &mut self,
        product_id: ProductId,
    ) -> Result<Vec<StockMovement>, StoreError>;
}
