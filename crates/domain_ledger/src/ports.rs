//! Ledger store port
//!
//! Implemented by the unit-of-work object of the backing store; all
//! methods run inside the coordinator's transaction.

use async_trait::async_trait;

use core_kernel::{CounterpartyId, PostingId, StoreError};

use crate::counterparty::Counterparty;
use crate::entry::Posting;

/// Row access for counterparties and postings
#[async_trait]
pub trait PostingStore: Send {
    async fn counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> Result<Option<Counterparty>, StoreError>;

    async fn insert_counterparty(&mut self, row: Counterparty) -> Result<(), StoreError>;

    /// Rewrites a counterparty row (cached balance, deactivation)
    async fn update_counterparty(&mut self, row: Counterparty) -> Result<(), StoreError>;

    async fn posting(&mut self, id: PostingId) -> Result<Option<Posting>, StoreError>;

    /// All postings of one counterparty, in no particular order
    async fn postings_of(&mut self, id: CounterpartyId) -> Result<Vec<Posting>, StoreError>;

    async fn insert_posting(&mut self, row: Posting) -> Result<(), StoreError>;

    /// Rewrites a posting row (`paid_amount`/`is_paid` only)
    async fn update_posting(&mut self, row: Posting) -> Result<(), StoreError>;
}
