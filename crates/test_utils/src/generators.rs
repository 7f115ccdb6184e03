//! Test data generators
//!
//! Proptest strategies for the domain's value types and fake-data helpers
//! for names.

use core_kernel::{Currency, Money};
use domain_ledger::EntryDirection;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive posting amounts (0.01 .. 10,000.00 lira)
pub fn positive_amount() -> impl Strategy<Value = Money> {
    (1i64..1_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::TRY))
}

/// Strategy for entry directions
pub fn entry_direction() -> impl Strategy<Value = EntryDirection> {
    prop_oneof![Just(EntryDirection::Debt), Just(EntryDirection::Credit)]
}

/// Strategy for positive stock quantities with two decimal places
pub fn stock_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Fake-data helpers for display names
pub struct NameGenerator;

impl NameGenerator {
    /// A plausible company name for counterparties
    pub fn company() -> String {
        CompanyName().fake()
    }

    /// A bank name for instruments
    pub fn bank() -> String {
        const BANKS: &[&str] = &["Ziraat", "Isbank", "Garanti", "Akbank", "Yapi Kredi"];
        let index: usize = (0..BANKS.len()).fake();
        BANKS[index].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{MoneyFixtures, TemporalFixtures};

    proptest! {
        #[test]
        fn positive_amount_is_always_positive(amount in positive_amount()) {
            prop_assert!(amount.is_positive());
            prop_assert_eq!(amount.currency(), Currency::TRY);
        }

        #[test]
        fn stock_quantity_is_always_positive(quantity in stock_quantity()) {
            prop_assert!(quantity > Decimal::ZERO);
        }

        #[test]
        fn entry_direction_covers_both_variants(direction in entry_direction()) {
            prop_assert!(matches!(
                direction,
                EntryDirection::Debt | EntryDirection::Credit
            ));
        }
    }

    #[test]
    fn test_generated_names_are_non_empty() {
        assert!(!NameGenerator::company().is_empty());
        assert!(!NameGenerator::bank().is_empty());
    }

    #[test]
    fn test_fixtures_are_internally_consistent() {
        use crate::fixtures::DocumentFixtures;

        assert!(MoneyFixtures::try_zero().is_zero());
        assert!(MoneyFixtures::try_100().checked_add(&MoneyFixtures::eur_100()).is_err());
        assert!(TemporalFixtures::past_due_date() < TemporalFixtures::today());
        assert!(TemporalFixtures::today() < TemporalFixtures::due_date());
        assert!(DocumentFixtures::sales_reference(1).reference_no.starts_with("SLS-"));
        assert!(DocumentFixtures::collection_reference(1).reference_no.starts_with("COL-"));
    }
}
