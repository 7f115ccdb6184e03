//! Instrument domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CounterpartyId, InstrumentId, MoneyError, StoreError};

use crate::instrument::InstrumentState;

/// Errors that can occur in the instrument domain
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// Face amounts must be strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// The instrument id does not resolve
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(InstrumentId),

    /// Endorsement attempted outside the portfolio
    #[error("Instrument {instrument} is not transferable from state {state:?}")]
    NotTransferable {
        instrument: InstrumentId,
        state: InstrumentState,
    },

    /// Transition outside the state diagram; nothing was changed
    #[error("Illegal transition from {from:?} to {to:?}")]
    IllegalTransition {
        from: InstrumentState,
        to: InstrumentState,
    },

    /// The selected instruments do not cover the event total exactly
    #[error("Amount mismatch: selected instruments total {selected}, required {required}")]
    AmountMismatch { required: Decimal, selected: Decimal },

    /// The endorsement log does not hand over continuously
    #[error("Broken custody chain for {instrument}: expected holder {expected}, found {found}")]
    BrokenCustodyChain {
        instrument: InstrumentId,
        expected: CounterpartyId,
        found: CounterpartyId,
    },

    /// Replaying the log disagrees with the stored custodian; requires
    /// manual reconciliation
    #[error("Custody mismatch for {instrument}: stored {stored}, replayed {replayed}")]
    CustodyMismatch {
        instrument: InstrumentId,
        stored: CounterpartyId,
        replayed: CounterpartyId,
    },

    /// Cross-currency operation
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
