//! Posting entry model
//!
//! Pure value logic with no I/O: the posting type, the balance fold, and
//! the overdue computation. Display ordering (e.g., newest-first in a UI)
//! is a separate concern and never changes the computed balances.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CounterpartyId, Currency, DocumentRef, Money, PostingId};

/// Direction of a posting against a counterparty's account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    /// The counterparty owes the tenant (raises the balance)
    Debt,
    /// The tenant owes the counterparty (lowers the balance)
    Credit,
}

/// A single account movement
///
/// Immutable once created, except for the `paid_amount`/`is_paid` pair,
/// which later settlements move through [`Posting::apply_payment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Unique posting identifier
    pub id: PostingId,
    /// Counterparty whose account this posting affects
    pub counterparty_id: CounterpartyId,
    /// Debt or credit
    pub direction: EntryDirection,
    /// Amount (always positive)
    pub amount: Money,
    /// Document this posting belongs to
    pub document: DocumentRef,
    /// Due date, when the document carries payment terms
    pub due_date: Option<NaiveDate>,
    /// Portion settled by later postings
    pub paid_amount: Money,
    /// Fully settled flag
    pub is_paid: bool,
    /// Creation instant; first component of the balance ordering
    pub created_at: DateTime<Utc>,
}

impl Posting {
    pub fn new(
        counterparty_id: CounterpartyId,
        direction: EntryDirection,
        amount: Money,
        document: DocumentRef,
        due_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PostingId::new_v7(),
            counterparty_id,
            direction,
            amount,
            document,
            due_date,
            paid_amount: Money::zero(amount.currency()),
            is_paid: false,
            created_at,
        }
    }

    /// The unsettled remainder of this posting
    pub fn outstanding(&self) -> Money {
        self.amount - self.paid_amount
    }

    /// The amount as it enters the balance fold
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            EntryDirection::Debt => self.amount,
            EntryDirection::Credit => -self.amount,
        }
    }

    /// True if this is an unsettled debt past its due date
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.direction == EntryDirection::Debt
            && !self.is_paid
            && self.due_date.map(|due| due < as_of).unwrap_or(false)
    }

    /// Records the settled portion; absolute, not incremental
    ///
    /// Idempotent for repeated identical amounts. Returns the previous
    /// paid amount so callers can tell a no-op from a change.
    pub(crate) fn apply_payment(&mut self, paid_amount: Money) -> Money {
        let previous = self.paid_amount;
        self.paid_amount = paid_amount;
        self.is_paid = paid_amount == self.amount;
        previous
    }
}

/// One line of the running-balance projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    pub posting: Posting,
    /// Balance of the counterparty after this posting was applied
    pub balance_after: Money,
}

/// Applies one posting to a balance
pub fn apply(balance: Money, posting: &Posting) -> Money {
    balance + posting.signed_amount()
}

/// Sorts postings into the canonical balance order: `(created_at, id)`
fn balance_order(postings: &[Posting]) -> Vec<Posting> {
    let mut ordered = postings.to_vec();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

/// The running-balance sequence: a left fold of [`apply`] from zero in
/// ascending `(created_at, id)` order
pub fn running_balance(postings: &[Posting], currency: Currency) -> Vec<StatementLine> {
    let mut balance = Money::zero(currency);
    balance_order(postings)
        .into_iter()
        .map(|posting| {
            balance = apply(balance, &posting);
            StatementLine {
                posting,
                balance_after: balance,
            }
        })
        .collect()
}

/// The balance implied by the full posting history
pub fn balance_of(postings: &[Posting], currency: Currency) -> Money {
    balance_order(postings)
        .iter()
        .fold(Money::zero(currency), |acc, p| apply(acc, p))
}

/// Unsettled debt past due as of the given date
pub fn overdue(postings: &[Posting], as_of: NaiveDate, currency: Currency) -> Money {
    postings
        .iter()
        .filter(|p| p.is_overdue(as_of))
        .fold(Money::zero(currency), |acc, p| acc + p.outstanding())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::DocumentType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn posting(direction: EntryDirection, amount: i64, seq: u32) -> Posting {
        let created_at = DateTime::from_timestamp(1_700_000_000 + i64::from(seq), 0).unwrap();
        Posting::new(
            CounterpartyId::new(),
            direction,
            Money::new(Decimal::new(amount, 0), Currency::TRY),
            DocumentRef::from_sequence(
                DocumentType::SalesInvoice,
                created_at.date_naive(),
                seq,
            ),
            None,
            created_at,
        )
    }

    #[test]
    fn test_apply_debt_raises_credit_lowers() {
        let zero = Money::zero(Currency::TRY);
        let debt = posting(EntryDirection::Debt, 1000, 1);
        let credit = posting(EntryDirection::Credit, 400, 2);

        let after_debt = apply(zero, &debt);
        assert_eq!(after_debt.amount(), dec!(1000));
        let after_credit = apply(after_debt, &credit);
        assert_eq!(after_credit.amount(), dec!(600));
    }

    #[test]
    fn test_running_balance_orders_by_creation_then_id() {
        let a = posting(EntryDirection::Debt, 100, 1);
        let b = posting(EntryDirection::Credit, 30, 2);
        let c = posting(EntryDirection::Debt, 5, 3);

        // Hand the postings over shuffled; the fold must not care.
        let lines = running_balance(&[c.clone(), a.clone(), b.clone()], Currency::TRY);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].posting.id, a.id);
        assert_eq!(lines[0].balance_after.amount(), dec!(100));
        assert_eq!(lines[1].balance_after.amount(), dec!(70));
        assert_eq!(lines[2].balance_after.amount(), dec!(75));
    }

    #[test]
    fn test_tie_on_created_at_breaks_by_id() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut a = posting(EntryDirection::Debt, 100, 1);
        let mut b = posting(EntryDirection::Credit, 100, 2);
        a.created_at = at;
        b.created_at = at;

        let lines = running_balance(&[b.clone(), a.clone()], Currency::TRY);
        let first_id = a.id.min(b.id);
        assert_eq!(lines[0].posting.id, first_id);
    }

    #[test]
    fn test_overdue_counts_unpaid_due_debt_only() {
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let before = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

        let mut due_debt = posting(EntryDirection::Debt, 1000, 1);
        due_debt.due_date = Some(before);

        let mut partially_paid = posting(EntryDirection::Debt, 500, 2);
        partially_paid.due_date = Some(before);
        partially_paid.apply_payment(Money::new(dec!(200), Currency::TRY));

        let mut not_due_yet = posting(EntryDirection::Debt, 700, 3);
        not_due_yet.due_date = Some(after);

        let mut overdue_credit = posting(EntryDirection::Credit, 50, 4);
        overdue_credit.due_date = Some(before);

        let undated = posting(EntryDirection::Debt, 900, 5);

        let total = overdue(
            &[due_debt, partially_paid, not_due_yet, overdue_credit, undated],
            as_of,
            Currency::TRY,
        );
        // 1000 outstanding + 300 outstanding
        assert_eq!(total.amount(), dec!(1300));
    }

    #[test]
    fn test_apply_payment_is_absolute_and_flags_full_settlement() {
        let mut p = posting(EntryDirection::Debt, 500, 1);

        p.apply_payment(Money::new(dec!(200), Currency::TRY));
        assert!(!p.is_paid);
        assert_eq!(p.outstanding().amount(), dec!(300));

        p.apply_payment(Money::new(dec!(500), Currency::TRY));
        assert!(p.is_paid);
        assert!(p.outstanding().is_zero());
    }
}
