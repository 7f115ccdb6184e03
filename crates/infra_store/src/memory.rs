//! In-memory transactional store
//!
//! `begin` takes an owned lock over the whole store and clones the tenant's
//! rows into a scratch area; every port method works on the scratch copy.
//! `commit` swaps the scratch back in while still holding the lock, so a
//! unit of work is atomic and serializable; dropping the unit (or calling
//! `rollback`) discards the scratch and releases the lock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use core_kernel::{
    CashAccountId, CounterpartyId, DocumentRef, DocumentType, DomainPort, InstrumentId,
    PostingId, ProductId, StoreError, TenantId,
};

use app_coordinator::{CommittedOutcome, IdempotencyKey, TransactionalStore, UnitOfWork};
use domain_cash::{CashAccount, CashMovement, CashStore};
use domain_instrument::{Endorsement, Instrument, InstrumentStore};
use domain_inventory::{on_hand_of, StockMovement, StockStore};
use domain_ledger::{Counterparty, Posting, PostingStore};

/// All rows of one tenant
#[derive(Debug, Default, Clone)]
struct TenantRows {
    counterparties: HashMap<CounterpartyId, Counterparty>,
    postings: HashMap<PostingId, Posting>,
    instruments: HashMap<InstrumentId, Instrument>,
    endorsements: Vec<Endorsement>,
    stock_movements: Vec<StockMovement>,
    cash_accounts: HashMap<CashAccountId, CashAccount>,
    cash_movements: Vec<CashMovement>,
    /// Next sequence per (document type, business date)
    sequences: HashMap<(DocumentType, NaiveDate), u32>,
    /// Uniqueness constraint on (document_type, reference_no)
    issued_references: HashSet<(DocumentType, String)>,
    /// Idempotency journal
    outcomes: HashMap<IdempotencyKey, CommittedOutcome>,
}

#[derive(Debug, Default)]
struct StoreState {
    tenants: HashMap<TenantId, TenantRows>,
}

/// The in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for MemoryStore {}

#[async_trait]
impl TransactionalStore for MemoryStore {
    type Tx = MemoryUnitOfWork;

    async fn begin(&self, tenant: TenantId) -> Result<Self::Tx, StoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let scratch = guard.tenants.get(&tenant).cloned().unwrap_or_default();
        Ok(MemoryUnitOfWork {
            guard,
            tenant,
            scratch,
        })
    }
}

/// One open unit of work against the in-memory store
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<StoreState>,
    tenant: TenantId,
    scratch: TenantRows,
}

#[async_trait]
impl PostingStore for MemoryUnitOfWork {
    async fn counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> Result<Option<Counterparty>, StoreError> {
        Ok(self.scratch.counterparties.get(&id).cloned())
    }

    async fn insert_counterparty(&mut self, row: Counterparty) -> Result<(), StoreError> {
        if self.scratch.counterparties.contains_key(&row.id) {
            return Err(StoreError::conflict(format!(
                "counterparty {} already exists",
                row.id
            )));
        }
        self.scratch.counterparties.insert(row.id, row);
        Ok(())
    }

    async fn update_counterparty(&mut self, row: Counterparty) -> Result<(), StoreError> {
        if !self.scratch.counterparties.contains_key(&row.id) {
            return Err(StoreError::not_found("Counterparty", row.id));
        }
        self.scratch.counterparties.insert(row.id, row);
        Ok(())
    }

    async fn posting(&mut self, id: PostingId) -> Result<Option<Posting>, StoreError> {
        Ok(self.scratch.postings.get(&id).cloned())
    }

    async fn postings_of(&mut self, id: CounterpartyId) -> Result<Vec<Posting>, StoreError> {
        Ok(self
            .scratch
            .postings
            .values()
            .filter(|p| p.counterparty_id == id)
            .cloned()
            .collect())
    }

    async fn insert_posting(&mut self, row: Posting) -> Result<(), StoreError> {
        self.scratch.postings.insert(row.id, row);
        Ok(())
    }

    async fn update_posting(&mut self, row: Posting) -> Result<(), StoreError> {
        if !self.scratch.postings.contains_key(&row.id) {
            return Err(StoreError::not_found("Posting", row.id));
        }
        self.scratch.postings.insert(row.id, row);
        Ok(())
    }
}

#[async_trait]
impl InstrumentStore for MemoryUnitOfWork {
    async fn instrument(&mut self, id: InstrumentId) -> Result<Option<Instrument>, StoreError> {
        Ok(self.scratch.instruments.get(&id).cloned())
    }

    async fn insert_instrument(&mut self, row: Instrument) -> Result<(), StoreError> {
        self.scratch.instruments.insert(row.id, row);
        Ok(())
    }

    async fn update_instrument(&mut self, row: Instrument) -> Result<(), StoreError> {
        if !self.scratch.instruments.contains_key(&row.id) {
            return Err(StoreError::not_found("Instrument", row.id));
        }
        self.scratch.instruments.insert(row.id, row);
        Ok(())
    }

    async fn insert_endorsement(&mut self, row: Endorsement) -> Result<(), StoreError> {
        self.scratch.endorsements.push(row);
        Ok(())
    }

    async fn endorsements_of(
        &mut self,
        id: InstrumentId,
    ) -> Result<Vec<Endorsement>, StoreError> {
        Ok(self
            .scratch
            .endorsements
            .iter()
            .filter(|e| e.instrument_id == id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StockStore for MemoryUnitOfWork {
    async fn on_hand(&mut self, product_id: ProductId) -> Result<Decimal, StoreError> {
        let movements: Vec<StockMovement> = self
            .scratch
            .stock_movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect();
        Ok(on_hand_of(&movements))
    }

    async fn insert_stock_movement(&mut self, row: StockMovement) -> Result<(), StoreError> {
        self.scratch.stock_movements.push(row);
        Ok(())
    }

    async fn stock_movements_of(
        &mut self,
        product_id: ProductId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        Ok(self
            .scratch
            .stock_movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CashStore for MemoryUnitOfWork {
    async fn cash_account(
        &mut self,
        id: CashAccountId,
    ) -> Result<Option<CashAccount>, StoreError> {
        Ok(self.scratch.cash_accounts.get(&id).cloned())
    }

    async fn insert_cash_account(&mut self, row: CashAccount) -> Result<(), StoreError> {
        if self.scratch.cash_accounts.contains_key(&row.id) {
            return Err(StoreError::conflict(format!(
                "cash account {} already exists",
                row.id
            )));
        }
        self.scratch.cash_accounts.insert(row.id, row);
        Ok(())
    }

    async fn update_cash_account(&mut self, row: CashAccount) -> Result<(), StoreError> {
        if !self.scratch.cash_accounts.contains_key(&row.id) {
            return Err(StoreError::not_found("CashAccount", row.id));
        }
        self.scratch.cash_accounts.insert(row.id, row);
        Ok(())
    }

    async fn insert_cash_movement(&mut self, row: CashMovement) -> Result<(), StoreError> {
        self.scratch.cash_movements.push(row);
        Ok(())
    }

    async fn cash_movements_of(
        &mut self,
        id: CashAccountId,
    ) -> Result<Vec<CashMovement>, StoreError> {
        Ok(self
            .scratch
            .cash_movements
            .iter()
            .filter(|m| m.account_id == Some(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn reserve_reference(
        &mut self,
        document_type: DocumentType,
        date: NaiveDate,
    ) -> Result<u32, StoreError> {
        let next = self
            .scratch
            .sequences
            .entry((document_type, date))
            .and_modify(|n| *n += 1)
            .or_insert(1);
        let sequence = *next;

        let reference = DocumentRef::from_sequence(document_type, date, sequence);
        if !self
            .scratch
            .issued_references
            .insert((document_type, reference.reference_no.clone()))
        {
            return Err(StoreError::conflict(format!(
                "reference {} already issued",
                reference.reference_no
            )));
        }
        Ok(sequence)
    }

    async fn committed_outcome(
        &mut self,
        key: &IdempotencyKey,
    ) -> Result<Option<CommittedOutcome>, StoreError> {
        Ok(self.scratch.outcomes.get(key).cloned())
    }

    async fn record_outcome(
        &mut self,
        key: IdempotencyKey,
        outcome: CommittedOutcome,
    ) -> Result<(), StoreError> {
        if self.scratch.outcomes.contains_key(&key) {
            return Err(StoreError::conflict(format!(
                "idempotency key {} already journaled",
                key
            )));
        }
        self.scratch.outcomes.insert(key, outcome);
        Ok(())
    }

    async fn commit(mut self) -> Result<(), StoreError> {
        debug!(tenant = %self.tenant, "committing unit of work");
        self.guard.tenants.insert(self.tenant, self.scratch);
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        debug!(tenant = %self.tenant, "rolling back unit of work");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::Currency;
    use domain_ledger::CounterpartyKind;
    use rust_decimal_macros::dec;

    fn customer() -> Counterparty {
        Counterparty::new(
            CounterpartyId::new(),
            "Aydin Market",
            CounterpartyKind::Customer,
            Currency::TRY,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_commit_publishes_rollback_discards() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();

        let committed = customer();
        let discarded = customer();

        let mut tx = store.begin(tenant).await.unwrap();
        tx.insert_counterparty(committed.clone()).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin(tenant).await.unwrap();
        tx.insert_counterparty(discarded.clone()).await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = store.begin(tenant).await.unwrap();
        assert!(tx.counterparty(committed.id).await.unwrap().is_some());
        assert!(tx.counterparty(discarded.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dropping_a_unit_discards_like_rollback() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();
        let row = customer();

        {
            let mut tx = store.begin(tenant).await.unwrap();
            tx.insert_counterparty(row.clone()).await.unwrap();
            // dropped without commit
        }

        let mut tx = store.begin(tenant).await.unwrap();
        assert!(tx.counterparty(row.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let store = MemoryStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let row = customer();

        let mut tx = store.begin(tenant_a).await.unwrap();
        tx.insert_counterparty(row.clone()).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin(tenant_b).await.unwrap();
        assert!(tx.counterparty(row.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sequences_are_strictly_increasing_per_key() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let mut tx = store.begin(tenant).await.unwrap();
        assert_eq!(
            tx.reserve_reference(DocumentType::SalesInvoice, date).await.unwrap(),
            1
        );
        assert_eq!(
            tx.reserve_reference(DocumentType::SalesInvoice, date).await.unwrap(),
            2
        );
        // independent keys
        assert_eq!(
            tx.reserve_reference(DocumentType::Collection, date).await.unwrap(),
            1
        );
        assert_eq!(
            tx.reserve_reference(DocumentType::SalesInvoice, other_date).await.unwrap(),
            1
        );
        tx.commit().await.unwrap();

        // continues after commit
        let mut tx = store.begin(tenant).await.unwrap();
        assert_eq!(
            tx.reserve_reference(DocumentType::SalesInvoice, date).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_uncommitted_sequence_reservations_are_released() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

        let mut tx = store.begin(tenant).await.unwrap();
        tx.reserve_reference(DocumentType::SalesInvoice, date).await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = store.begin(tenant).await.unwrap();
        assert_eq!(
            tx.reserve_reference(DocumentType::SalesInvoice, date).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_idempotency_journal_entry_conflicts() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();
        let key = IdempotencyKey::new("evt-1");
        let outcome = CommittedOutcome::CashVoucher(app_coordinator::CashVoucherReceipt {
            reference: DocumentRef::external(DocumentType::CashVoucher, "CSH-20260805-0001"),
            movement_id: core_kernel::CashMovementId::new(),
        });

        let mut tx = store.begin(tenant).await.unwrap();
        tx.record_outcome(key.clone(), outcome.clone()).await.unwrap();
        let second = tx.record_outcome(key.clone(), outcome).await;
        assert!(matches!(second, Err(StoreError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_units_serialize_one_at_a_time() {
        let store = MemoryStore::new();
        let tenant = TenantId::new();
        let row = customer();

        let mut tx1 = store.begin(tenant).await.unwrap();
        tx1.insert_counterparty(row.clone()).await.unwrap();

        // A second unit must wait for the first to finish
        let store2 = store.clone();
        let id = row.id;
        let reader = tokio::spawn(async move {
            let mut tx2 = store2.begin(tenant).await.unwrap();
            tx2.counterparty(id).await.unwrap().is_some()
        });

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!reader.is_finished());

        tx1.commit().await.unwrap();
        assert!(reader.await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TenantId::new()).await.unwrap();
        let result = tx.update_counterparty(customer()).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_on_hand_sums_scratch_movements() {
        use core_kernel::ProductId;
        use domain_inventory::StockDirection;

        let store = MemoryStore::new();
        let mut tx = store.begin(TenantId::new()).await.unwrap();
        let product = ProductId::new();
        let reference = DocumentRef::external(DocumentType::PurchaseInvoice, "PRC-X");

        tx.insert_stock_movement(StockMovement::new(
            product,
            StockDirection::In,
            dec!(10),
            reference.clone(),
            Utc::now(),
        ))
        .await
        .unwrap();
        tx.insert_stock_movement(StockMovement::new(
            product,
            StockDirection::Out,
            dec!(4),
            reference,
            Utc::now(),
        ))
        .await
        .unwrap();

        assert_eq!(tx.on_hand(product).await.unwrap(), dec!(6));
    }
}
