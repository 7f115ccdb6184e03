//! Counterparty aggregate
//!
//! A counterparty is a customer, a supplier, or both. Counterparties are
//! never hard-deleted; deactivation closes the account to new postings
//! while the history stays readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CounterpartyId, Currency, Money};

/// Which side of the business the counterparty sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyKind {
    Customer,
    Supplier,
    Both,
}

/// A counterparty with its cached balance
///
/// The `balance` field is a materialized view of the posting history. It is
/// only ever written together with the posting that moves it, and
/// `AccountLedgerService::balance_of` checks it against a recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Unique identifier
    pub id: CounterpartyId,
    /// Display name
    pub name: String,
    /// Customer, supplier, or both
    pub kind: CounterpartyKind,
    /// Optional exposure ceiling, informational
    pub credit_limit: Option<Money>,
    /// Cached signed balance (positive: owes the tenant)
    pub balance: Money,
    /// Soft-deletion flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Counterparty {
    pub fn new(
        id: CounterpartyId,
        name: impl Into<String>,
        kind: CounterpartyKind,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            credit_limit: None,
            balance: Money::zero(currency),
            is_active: true,
            created_at,
        }
    }

    /// Sets the informational credit limit
    pub fn with_credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    /// Closes the account to new postings
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Read-only credit exposure projection for the reporting layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditExposure {
    pub counterparty_id: CounterpartyId,
    /// Current signed balance
    pub balance: Money,
    /// Configured ceiling, if any
    pub credit_limit: Option<Money>,
    /// Remaining headroom under the limit; None when no limit is set
    pub available: Option<Money>,
}

impl CreditExposure {
    pub fn of(counterparty: &Counterparty) -> Self {
        let available = counterparty
            .credit_limit
            .map(|limit| limit - counterparty.balance);
        Self {
            counterparty_id: counterparty.id,
            balance: counterparty.balance,
            credit_limit: counterparty.credit_limit,
            available,
        }
    }
}
