//! Cash domain errors

use thiserror::Error;

use core_kernel::{CashAccountId, MoneyError, StoreError};

/// Errors that can occur in the cash domain
#[derive(Debug, Error)]
pub enum CashError {
    /// Movement amounts must be strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(rust_decimal::Decimal),

    /// The account id does not resolve
    #[error("Unknown cash account: {0}")]
    UnknownAccount(CashAccountId),

    /// Both legs of a transfer would hit the same account
    #[error("Transfer source and target are the same account: {0}")]
    SameAccountTransfer(CashAccountId),

    /// Cross-currency operation
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
