//! Coordinator errors
//!
//! Every failure maps to a stable machine-readable code so the consuming
//! layer can render an actionable message without matching on strings.

use thiserror::Error;

use core_kernel::{InstrumentId, MoneyError, StoreError};
use domain_cash::CashError;
use domain_instrument::InstrumentError;
use domain_inventory::InventoryError;
use domain_ledger::LedgerError;

/// Errors surfaced by coordinator operations
///
/// None of these leaves partial state behind: a failing operation rolls its
/// whole unit of work back.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The event carries nothing to post
    #[error("Business event carries no items")]
    EmptyEvent,

    /// The same instrument was selected twice for one event
    #[error("Instrument selected more than once: {0}")]
    DuplicateInstrument(InstrumentId),

    /// The idempotency key was committed by a different kind of operation
    #[error("Idempotency key {key} was committed by a different operation")]
    IdempotencyMismatch { key: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Cash(#[from] CashError),

    /// Cross-currency input
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The underlying store failed; the event did not happen and may be
    /// retried with the same idempotency key
    #[error("Posting failed: {0}")]
    PostingFailed(#[from] StoreError),
}

impl CoordinatorError {
    /// Stable error code for the consuming layer
    pub fn code(&self) -> &'static str {
        match self {
            CoordinatorError::EmptyEvent => "empty_event",
            CoordinatorError::DuplicateInstrument(_) => "duplicate_instrument",
            CoordinatorError::IdempotencyMismatch { .. } => "idempotency_mismatch",
            CoordinatorError::Money(_) => "currency_mismatch",
            CoordinatorError::PostingFailed(_) => "posting_failed",

            CoordinatorError::Ledger(e) => match e {
                LedgerError::InvalidAmount(_) => "invalid_amount",
                LedgerError::UnknownCounterparty(_) => "unknown_counterparty",
                LedgerError::InactiveCounterparty(_) => "inactive_counterparty",
                LedgerError::UnknownPosting(_) => "unknown_posting",
                LedgerError::OverPayment { .. } => "overpayment",
                LedgerError::BalanceMismatch { .. } => "balance_mismatch",
                LedgerError::Money(_) => "currency_mismatch",
                LedgerError::Store(_) => "posting_failed",
            },

            CoordinatorError::Instrument(e) => match e {
                InstrumentError::InvalidAmount(_) => "invalid_amount",
                InstrumentError::UnknownInstrument(_) => "unknown_instrument",
                InstrumentError::NotTransferable { .. } => "instrument_not_transferable",
                InstrumentError::IllegalTransition { .. } => "illegal_transition",
                InstrumentError::AmountMismatch { .. } => "amount_mismatch",
                InstrumentError::BrokenCustodyChain { .. }
                | InstrumentError::CustodyMismatch { .. } => "custody_mismatch",
                InstrumentError::Money(_) => "currency_mismatch",
                InstrumentError::Store(_) => "posting_failed",
            },

            CoordinatorError::Inventory(e) => match e {
                InventoryError::InvalidQuantity(_) => "invalid_quantity",
                InventoryError::InsufficientStock { .. } => "insufficient_stock",
                InventoryError::Store(_) => "posting_failed",
            },

            CoordinatorError::Cash(e) => match e {
                CashError::InvalidAmount(_) => "invalid_amount",
                CashError::UnknownAccount(_) => "unknown_cash_account",
                CashError::SameAccountTransfer(_) => "same_account_transfer",
                CashError::Money(_) => "currency_mismatch",
                CashError::Store(_) => "posting_failed",
            },
        }
    }

    /// True when retrying with the same idempotency key may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CoordinatorError::PostingFailed(e) => e.is_transient(),
            CoordinatorError::Ledger(LedgerError::Store(e)) => e.is_transient(),
            CoordinatorError::Instrument(InstrumentError::Store(e)) => e.is_transient(),
            CoordinatorError::Inventory(InventoryError::Store(e)) => e.is_transient(),
            CoordinatorError::Cash(CashError::Store(e)) => e.is_transient(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CounterpartyId, ProductId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes_are_stable_and_specific() {
        let insufficient = CoordinatorError::Inventory(InventoryError::InsufficientStock {
            product: ProductId::new(),
            requested: dec!(15),
            on_hand: dec!(10),
        });
        assert_eq!(insufficient.code(), "insufficient_stock");

        let mismatch = CoordinatorError::Instrument(InstrumentError::AmountMismatch {
            required: dec!(500),
            selected: dec!(450),
        });
        assert_eq!(mismatch.code(), "amount_mismatch");

        let unknown = CoordinatorError::Ledger(LedgerError::UnknownCounterparty(
            CounterpartyId::new(),
        ));
        assert_eq!(unknown.code(), "unknown_counterparty");
    }

    #[test]
    fn test_retryability_tracks_store_transience() {
        let timeout = CoordinatorError::PostingFailed(StoreError::Timeout {
            operation: "commit".to_string(),
        });
        assert!(timeout.is_retryable());

        let conflict = CoordinatorError::PostingFailed(StoreError::conflict("duplicate reference"));
        assert!(!conflict.is_retryable());

        assert!(!CoordinatorError::EmptyEvent.is_retryable());
    }
}
