//! Cash account aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CashAccountId, Currency, Money};

use crate::movement::CashMovement;

/// A cash drawer or bank account
///
/// The `balance` field is a materialized view of the movement history and
/// is only ever written together with the movement that moves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    /// Unique identifier
    pub id: CashAccountId,
    /// Display name (e.g., "Main drawer", "Ziraat checking")
    pub name: String,
    /// Cached signed balance
    pub balance: Money,
    /// Soft-deletion flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CashAccount {
    pub fn new(
        id: CashAccountId,
        name: impl Into<String>,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance: Money::zero(currency),
            is_active: true,
            created_at,
        }
    }

    /// Moves the cached balance by one movement's signed amount
    pub fn apply(&mut self, movement: &CashMovement) {
        self.balance = self.balance + movement.signed_amount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::CashMovement;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_moves_balance_by_signed_amount() {
        let mut account = CashAccount::new(
            CashAccountId::new(),
            "Main drawer",
            Currency::TRY,
            Utc::now(),
        );

        let income = CashMovement::income(
            Some(account.id),
            Money::new(dec!(300), Currency::TRY),
            Utc::now(),
        )
        .with_category("sales");
        let expense = CashMovement::expense(
            Some(account.id),
            Money::new(dec!(120), Currency::TRY),
            Utc::now(),
        )
        .with_category("rent");

        account.apply(&income);
        account.apply(&expense);
        assert_eq!(account.balance.amount(), dec!(180));
    }
}
