//! Cash movement types
//!
//! Direction is a closed enumeration. A transfer is represented as its two
//! legs (`TransferOut` on the source, `TransferIn` on the target), built
//! only through [`CashMovement::transfer_pair`] so one leg cannot exist
//! without the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CashAccountId, CashMovementId, CounterpartyId, DocumentRef, Money};

use crate::error::CashError;

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashDirection {
    /// Money in
    Income,
    /// Money out
    Expense,
    /// Outgoing leg of a transfer
    TransferOut,
    /// Incoming leg of a transfer
    TransferIn,
}

/// One cash movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashMovement {
    /// Unique identifier
    pub id: CashMovementId,
    /// Account moved; None for drawerless petty entries
    pub account_id: Option<CashAccountId>,
    /// Direction
    pub direction: CashDirection,
    /// Amount (always positive)
    pub amount: Money,
    /// Counterparty involved, if any
    pub counterparty_id: Option<CounterpartyId>,
    /// Reporting category, an explicit field - never inferred from text
    pub category: Option<String>,
    /// Document this movement belongs to, if it came out of a ledger event
    pub reference: Option<DocumentRef>,
    /// The peer account of a transfer leg
    pub counter_account: Option<CashAccountId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CashMovement {
    /// Money taken in
    pub fn income(
        account_id: Option<CashAccountId>,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::base(account_id, CashDirection::Income, amount, created_at)
    }

    /// Money paid out
    pub fn expense(
        account_id: Option<CashAccountId>,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::base(account_id, CashDirection::Expense, amount, created_at)
    }

    /// Both legs of a transfer between two accounts
    ///
    /// The legs share the reference and point at each other; callers must
    /// persist both in the same unit of work.
    pub fn transfer_pair(
        from: CashAccountId,
        to: CashAccountId,
        amount: Money,
        reference: DocumentRef,
        created_at: DateTime<Utc>,
    ) -> Result<(CashMovement, CashMovement), CashError> {
        if from == to {
            return Err(CashError::SameAccountTransfer(from));
        }
        let outgoing = Self::base(Some(from), CashDirection::TransferOut, amount, created_at)
            .with_reference(reference.clone())
            .with_counter_account(to);
        let incoming = Self::base(Some(to), CashDirection::TransferIn, amount, created_at)
            .with_reference(reference)
            .with_counter_account(from);
        Ok((outgoing, incoming))
    }

    /// Sets the reporting category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Ties the movement to a counterparty
    pub fn with_counterparty(mut self, counterparty_id: CounterpartyId) -> Self {
        self.counterparty_id = Some(counterparty_id);
        self
    }

    /// Ties the movement to a ledger document
    pub fn with_reference(mut self, reference: DocumentRef) -> Self {
        self.reference = Some(reference);
        self
    }

    fn with_counter_account(mut self, account: CashAccountId) -> Self {
        self.counter_account = Some(account);
        self
    }

    /// The amount as it enters the account's balance sum
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            CashDirection::Income | CashDirection::TransferIn => self.amount,
            CashDirection::Expense | CashDirection::TransferOut => -self.amount,
        }
    }

    fn base(
        account_id: Option<CashAccountId>,
        direction: CashDirection,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CashMovementId::new_v7(),
            account_id,
            direction,
            amount,
            counterparty_id: None,
            category: None,
            reference: None,
            counter_account: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, DocumentType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn lira(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::TRY)
    }

    fn reference() -> DocumentRef {
        DocumentRef::from_sequence(
            DocumentType::TransferVoucher,
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            1,
        )
    }

    #[test]
    fn test_signed_amounts() {
        let account = CashAccountId::new();
        let income = CashMovement::income(Some(account), lira(dec!(100)), Utc::now());
        let expense = CashMovement::expense(Some(account), lira(dec!(40)), Utc::now());

        assert_eq!(income.signed_amount().amount(), dec!(100));
        assert_eq!(expense.signed_amount().amount(), dec!(-40));
    }

    #[test]
    fn test_transfer_pair_mirrors_legs() {
        let from = CashAccountId::new();
        let to = CashAccountId::new();

        let (outgoing, incoming) =
            CashMovement::transfer_pair(from, to, lira(dec!(250)), reference(), Utc::now())
                .unwrap();

        assert_eq!(outgoing.direction, CashDirection::TransferOut);
        assert_eq!(incoming.direction, CashDirection::TransferIn);
        assert_eq!(outgoing.account_id, Some(from));
        assert_eq!(incoming.account_id, Some(to));
        assert_eq!(outgoing.counter_account, Some(to));
        assert_eq!(incoming.counter_account, Some(from));
        assert_eq!(outgoing.reference, incoming.reference);
        // legs cancel out across the two accounts
        assert!(
            (outgoing.signed_amount() + incoming.signed_amount()).is_zero()
        );
    }

    #[test]
    fn test_transfer_to_same_account_is_rejected() {
        let account = CashAccountId::new();
        let result =
            CashMovement::transfer_pair(account, account, lira(dec!(10)), reference(), Utc::now());
        assert!(matches!(result, Err(CashError::SameAccountTransfer(_))));
    }

    #[test]
    fn test_category_is_an_explicit_field() {
        let movement = CashMovement::expense(None, lira(dec!(75)), Utc::now())
            .with_category("utilities");
        assert_eq!(movement.category.as_deref(), Some("utilities"));
    }
}
