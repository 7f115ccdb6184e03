//! Account ledger service
//!
//! Owns all postings of a counterparty: appends them, keeps the cached
//! balance honest, and serves the read-only projections. Every method runs
//! against the store port handed in by the coordinator, inside the
//! coordinator's transaction; the service itself never begins or commits.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error};

use core_kernel::{CounterpartyId, DocumentRef, Money, PostingId, TenantConfig};

use crate::counterparty::{Counterparty, CreditExposure};
use crate::entry::{self, EntryDirection, Posting, StatementLine};
use crate::error::LedgerError;
use crate::ports::PostingStore;

/// Service over counterparty accounts and their postings
#[derive(Debug, Clone)]
pub struct AccountLedgerService {
    config: TenantConfig,
}

impl AccountLedgerService {
    pub fn new(config: TenantConfig) -> Self {
        Self { config }
    }

    /// Registers a counterparty
    pub async fn register<S>(
        &self,
        store: &mut S,
        counterparty: Counterparty,
    ) -> Result<CounterpartyId, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        counterparty.balance.ensure_currency(self.config.currency)?;
        let id = counterparty.id;
        store.insert_counterparty(counterparty).await?;
        Ok(id)
    }

    /// Closes a counterparty account to new postings (soft)
    pub async fn deactivate<S>(
        &self,
        store: &mut S,
        id: CounterpartyId,
    ) -> Result<(), LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        let mut counterparty = self.resolve(store, id).await?;
        counterparty.deactivate();
        store.update_counterparty(counterparty).await?;
        Ok(())
    }

    /// Appends a posting and moves the cached balance in the same unit
    pub async fn post<S>(
        &self,
        store: &mut S,
        counterparty_id: CounterpartyId,
        direction: EntryDirection,
        amount: Money,
        document: DocumentRef,
        due_date: Option<NaiveDate>,
        at: DateTime<Utc>,
    ) -> Result<PostingId, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        amount.ensure_currency(self.config.currency)?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount.amount()));
        }

        let mut counterparty = self.resolve(store, counterparty_id).await?;
        if !counterparty.is_active {
            return Err(LedgerError::InactiveCounterparty(counterparty_id));
        }

        let posting = Posting::new(counterparty_id, direction, amount, document, due_date, at);
        let posting_id = posting.id;

        counterparty.balance = entry::apply(counterparty.balance, &posting);
        store.insert_posting(posting).await?;
        store.update_counterparty(counterparty).await?;

        debug!(%counterparty_id, %posting_id, ?direction, amount = %amount, "posting appended");
        Ok(posting_id)
    }

    /// The counterparty's balance, recomputed and reconciled with the cache
    ///
    /// A mismatch is a bug somewhere in a write path; it halts this read
    /// and is never papered over by rewriting the cache.
    pub async fn balance_of<S>(
        &self,
        store: &mut S,
        counterparty_id: CounterpartyId,
    ) -> Result<Money, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        let counterparty = self.resolve(store, counterparty_id).await?;
        let postings = store.postings_of(counterparty_id).await?;
        let computed = entry::balance_of(&postings, self.config.currency);

        if computed != counterparty.balance {
            error!(
                %counterparty_id,
                cached = %counterparty.balance,
                computed = %computed,
                "cached balance disagrees with posting history"
            );
            return Err(LedgerError::BalanceMismatch {
                counterparty: counterparty_id,
                cached: counterparty.balance.amount(),
                computed: computed.amount(),
            });
        }

        Ok(computed)
    }

    /// Marks the settled portion of a posting; idempotent for identical calls
    pub async fn mark_paid<S>(
        &self,
        store: &mut S,
        posting_id: PostingId,
        paid_amount: Money,
    ) -> Result<(), LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        paid_amount.ensure_currency(self.config.currency)?;
        if paid_amount.is_negative() {
            return Err(LedgerError::InvalidAmount(paid_amount.amount()));
        }

        let mut posting = store
            .posting(posting_id)
            .await?
            .ok_or(LedgerError::UnknownPosting(posting_id))?;

        if paid_amount.checked_cmp(&posting.amount)? == std::cmp::Ordering::Greater {
            return Err(LedgerError::OverPayment {
                posting: posting_id,
                amount: posting.amount.amount(),
                paid: paid_amount.amount(),
            });
        }

        if posting.paid_amount == paid_amount {
            // repeated identical call
            return Ok(());
        }

        posting.apply_payment(paid_amount);
        store.update_posting(posting).await?;
        Ok(())
    }

    /// Unsettled debt past due as of the given date
    pub async fn overdue_exposure<S>(
        &self,
        store: &mut S,
        counterparty_id: CounterpartyId,
        as_of: NaiveDate,
    ) -> Result<Money, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        self.resolve(store, counterparty_id).await?;
        let postings = store.postings_of(counterparty_id).await?;
        Ok(entry::overdue(&postings, as_of, self.config.currency))
    }

    /// Balance against the configured credit limit
    pub async fn credit_exposure<S>(
        &self,
        store: &mut S,
        counterparty_id: CounterpartyId,
    ) -> Result<CreditExposure, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        let counterparty = self.resolve(store, counterparty_id).await?;
        Ok(CreditExposure::of(&counterparty))
    }

    /// The running-balance statement, oldest first
    pub async fn statement<S>(
        &self,
        store: &mut S,
        counterparty_id: CounterpartyId,
    ) -> Result<Vec<StatementLine>, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        self.resolve(store, counterparty_id).await?;
        let postings = store.postings_of(counterparty_id).await?;
        Ok(entry::running_balance(&postings, self.config.currency))
    }

    async fn resolve<S>(
        &self,
        store: &mut S,
        id: CounterpartyId,
    ) -> Result<Counterparty, LedgerError>
    where
        S: PostingStore + ?Sized,
    {
        store
            .counterparty(id)
            .await?
            .ok_or(LedgerError::UnknownCounterparty(id))
    }
}
