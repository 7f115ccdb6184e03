//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CounterpartyId, MoneyError, PostingId, StoreError};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Posting amounts must be strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// The counterparty id does not resolve
    #[error("Unknown counterparty: {0}")]
    UnknownCounterparty(CounterpartyId),

    /// The counterparty has been deactivated
    #[error("Counterparty is inactive: {0}")]
    InactiveCounterparty(CounterpartyId),

    /// The posting id does not resolve
    #[error("Unknown posting: {0}")]
    UnknownPosting(PostingId),

    /// Settlement beyond the posting's amount
    #[error("Overpayment on {posting}: paid {paid} exceeds amount {amount}")]
    OverPayment {
        posting: PostingId,
        amount: Decimal,
        paid: Decimal,
    },

    /// The cached balance disagrees with the posting history; requires
    /// manual reconciliation, never auto-corrected
    #[error("Balance mismatch for {counterparty}: cached {cached}, recomputed {computed}")]
    BalanceMismatch {
        counterparty: CounterpartyId,
        cached: Decimal,
        computed: Decimal,
    },

    /// Cross-currency operation
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
