//! Cash store port

use async_trait::async_trait;

use core_kernel::{CashAccountId, StoreError};

use crate::account::CashAccount;
use crate::movement::CashMovement;

/// Row access for cash accounts and movements
#[async_trait]
pub trait CashStore: Send {
    async fn cash_account(
        &mut self,
        id: CashAccountId,
    ) -> Result<Option<CashAccount>, StoreError>;

    async fn insert_cash_account(&mut self, row: CashAccount) -> Result<(), StoreError>;

    /// Rewrites a cash account row (cached balance, deactivation)
    async fn update_cash_account(&mut self, row: CashAccount) -> Result<(), StoreError>;

    async fn insert_cash_movement(&mut self, row: CashMovement) -> Result<(), StoreError>;

    /// Movement history of one account, in append order
    async fn cash_movements_of(
        &mut self,
        id: CashAccountId,
    ) -> Result<Vec<CashMovement>, StoreError>;
}
