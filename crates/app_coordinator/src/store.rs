//! The transactional store consumed by the coordinator
//!
//! The core does not implement a relational store; it consumes one through
//! these traits. An adapter provides a unit-of-work object that exposes the
//! four domain ports plus reference numbering and the idempotency journal,
//! all inside one transaction that commits or rolls back as a whole.
//!
//! Isolation contract: between `begin` and `commit`, the rows the unit of
//! work touches (counterparty balances, instrument states, stock levels,
//! cash balances, reference sequences) must be protected at least at
//! snapshot/serializable level, so that concurrent units observe each
//! other's effects only after commit.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DocumentType, DomainPort, StoreError, TenantId};
use domain_cash::CashStore;
use domain_instrument::InstrumentStore;
use domain_inventory::StockStore;
use domain_ledger::PostingStore;

use crate::events::{CommittedOutcome, IdempotencyKey};

/// A store that can open tenant-scoped units of work
#[async_trait]
pub trait TransactionalStore: DomainPort {
    type Tx: UnitOfWork;

    /// Opens a transaction over one tenant's rows; may block on isolation
    async fn begin(&self, tenant: TenantId) -> Result<Self::Tx, StoreError>;
}

/// One atomic unit of work
///
/// Dropping a unit of work without committing discards every buffered
/// write; `rollback` does the same explicitly.
#[async_trait]
pub trait UnitOfWork:
    PostingStore + InstrumentStore + StockStore + CashStore + Send
{
    /// Atomically reserves the next sequence number for
    /// `(tenant, document_type, date)`
    ///
    /// Strictly increasing per key, never derived by counting rows. The
    /// adapter must back this with a uniqueness constraint on
    /// `(tenant, document_type, reference_no)` so a race fails loudly with
    /// [`StoreError::Conflict`] instead of colliding silently.
    async fn reserve_reference(
        &mut self,
        document_type: DocumentType,
        date: NaiveDate,
    ) -> Result<u32, StoreError>;

    /// Looks up the outcome a key already committed, if any
    async fn committed_outcome(
        &mut self,
        key: &IdempotencyKey,
    ) -> Result<Option<CommittedOutcome>, StoreError>;

    /// Journals the outcome of the current unit under its key
    async fn record_outcome(
        &mut self,
        key: IdempotencyKey,
        outcome: CommittedOutcome,
    ) -> Result<(), StoreError>;

    /// Publishes every buffered write atomically
    async fn commit(self) -> Result<(), StoreError>;

    /// Discards every buffered write
    async fn rollback(self) -> Result<(), StoreError>;
}
