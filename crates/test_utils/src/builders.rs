//! Test data builders
//!
//! Builders with sensible defaults; tests override only the fields the
//! scenario cares about.

use chrono::NaiveDate;
use core_kernel::{CashAccountId, CounterpartyId, Currency, DocumentRef, Money};
use domain_cash::CashAccount;
use domain_instrument::{Instrument, InstrumentDirection};
use domain_ledger::{Counterparty, CounterpartyKind, EntryDirection, Posting};

use crate::fixtures::{DocumentFixtures, MoneyFixtures, TemporalFixtures};
use crate::generators::NameGenerator;

/// Builder for counterparties
pub struct CounterpartyBuilder {
    id: CounterpartyId,
    name: String,
    kind: CounterpartyKind,
    credit_limit: Option<Money>,
}

impl Default for CounterpartyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterpartyBuilder {
    pub fn new() -> Self {
        Self {
            id: CounterpartyId::new(),
            name: NameGenerator::company(),
            kind: CounterpartyKind::Customer,
            credit_limit: None,
        }
    }

    pub fn with_id(mut self, id: CounterpartyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn supplier(mut self) -> Self {
        self.kind = CounterpartyKind::Supplier;
        self
    }

    pub fn with_credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn build(self) -> Counterparty {
        let mut counterparty = Counterparty::new(
            self.id,
            self.name,
            self.kind,
            Currency::TRY,
            TemporalFixtures::created_at(0),
        );
        if let Some(limit) = self.credit_limit {
            counterparty = counterparty.with_credit_limit(limit);
        }
        counterparty
    }
}

/// Builder for postings
pub struct PostingBuilder {
    counterparty_id: CounterpartyId,
    direction: EntryDirection,
    amount: Money,
    document: DocumentRef,
    due_date: Option<NaiveDate>,
    created_offset: i64,
}

impl Default for PostingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PostingBuilder {
    pub fn new() -> Self {
        Self {
            counterparty_id: CounterpartyId::new(),
            direction: EntryDirection::Debt,
            amount: MoneyFixtures::try_100(),
            document: DocumentFixtures::sales_reference(1),
            due_date: None,
            created_offset: 0,
        }
    }

    pub fn for_counterparty(mut self, id: CounterpartyId) -> Self {
        self.counterparty_id = id;
        self
    }

    pub fn credit(mut self) -> Self {
        self.direction = EntryDirection::Credit;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_document(mut self, document: DocumentRef) -> Self {
        self.document = document;
        self
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Offsets the creation instant, for ordering scenarios
    pub fn created_later_by(mut self, seconds: i64) -> Self {
        self.created_offset = seconds;
        self
    }

    pub fn build(self) -> Posting {
        Posting::new(
            self.counterparty_id,
            self.direction,
            self.amount,
            self.document,
            self.due_date,
            TemporalFixtures::created_at(self.created_offset),
        )
    }
}

/// Builder for instruments
pub struct InstrumentBuilder {
    counterparty_id: CounterpartyId,
    instrument_no: String,
    bank: String,
    amount: Money,
    due_date: NaiveDate,
    direction: InstrumentDirection,
}

impl Default for InstrumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstrumentBuilder {
    pub fn new() -> Self {
        Self {
            counterparty_id: CounterpartyId::new(),
            instrument_no: "0004711".to_string(),
            bank: NameGenerator::bank(),
            amount: MoneyFixtures::try_500(),
            due_date: TemporalFixtures::due_date(),
            direction: InstrumentDirection::Received,
        }
    }

    pub fn held_by(mut self, counterparty_id: CounterpartyId) -> Self {
        self.counterparty_id = counterparty_id;
        self
    }

    pub fn with_number(mut self, instrument_no: impl Into<String>) -> Self {
        self.instrument_no = instrument_no.into();
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn issued(mut self) -> Self {
        self.direction = InstrumentDirection::Issued;
        self
    }

    pub fn build(self) -> Instrument {
        Instrument::new(
            self.counterparty_id,
            self.instrument_no,
            self.bank,
            self.amount,
            self.due_date,
            self.direction,
            TemporalFixtures::created_at(0),
        )
    }
}

/// Builder for cash accounts
pub struct CashAccountBuilder {
    id: CashAccountId,
    name: String,
}

impl Default for CashAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CashAccountBuilder {
    pub fn new() -> Self {
        Self {
            id: CashAccountId::new(),
            name: "Main drawer".to_string(),
        }
    }

    pub fn with_id(mut self, id: CashAccountId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> CashAccount {
        CashAccount::new(self.id, self.name, Currency::TRY, TemporalFixtures::created_at(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterparty_builder_defaults() {
        let counterparty = CounterpartyBuilder::new().build();
        assert_eq!(counterparty.kind, CounterpartyKind::Customer);
        assert!(counterparty.is_active);
        assert!(counterparty.balance.is_zero());
        assert!(!counterparty.name.is_empty());
    }

    #[test]
    fn test_counterparty_builder_customization() {
        let supplier = CounterpartyBuilder::new()
            .with_name("Deniz Toptan")
            .supplier()
            .with_credit_limit(MoneyFixtures::try_500())
            .build();

        assert_eq!(supplier.kind, CounterpartyKind::Supplier);
        assert_eq!(supplier.name, "Deniz Toptan");
        assert_eq!(supplier.credit_limit, Some(MoneyFixtures::try_500()));
    }

    #[test]
    fn test_posting_builder_ordering_offsets() {
        let earlier = PostingBuilder::new().build();
        let later = PostingBuilder::new().created_later_by(60).build();

        assert!(earlier.created_at < later.created_at);
        assert_eq!(earlier.direction, EntryDirection::Debt);
        assert_eq!(
            PostingBuilder::new().credit().build().direction,
            EntryDirection::Credit
        );
    }

    #[test]
    fn test_posting_builder_starts_unsettled() {
        let posting = PostingBuilder::new()
            .due_on(TemporalFixtures::due_date())
            .build();
        assert!(!posting.is_paid);
        assert!(posting.paid_amount.is_zero());
        assert_eq!(posting.outstanding(), posting.amount);
    }

    #[test]
    fn test_instrument_builder_enters_portfolio() {
        let holder = CounterpartyId::new();
        let check = InstrumentBuilder::new()
            .held_by(holder)
            .with_number("0009999")
            .issued()
            .build();

        assert_eq!(check.counterparty_id, holder);
        assert_eq!(check.instrument_no, "0009999");
        assert_eq!(check.direction, InstrumentDirection::Issued);
    }
}
