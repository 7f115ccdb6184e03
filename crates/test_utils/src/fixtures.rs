//! Pre-built test fixtures
//!
//! Ready-to-use, predictable test data for the common entities.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Currency, DocumentRef, DocumentType, Money, TenantConfig, TenantId};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard lira amount
    pub fn try_100() -> Money {
        Money::new(dec!(100.00), Currency::TRY)
    }

    /// The face amount used by most check scenarios
    pub fn try_500() -> Money {
        Money::new(dec!(500.00), Currency::TRY)
    }

    /// A zero amount
    pub fn try_zero() -> Money {
        Money::zero(Currency::TRY)
    }

    /// A euro amount for currency-mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for tenant configuration
pub struct TenantFixtures;

impl TenantFixtures {
    /// A lira tenant in the default (UTC) timezone
    pub fn lira_tenant() -> TenantConfig {
        TenantConfig::new(TenantId::new(), Currency::TRY)
    }

    /// A lira tenant on Istanbul time
    pub fn istanbul_tenant() -> TenantConfig {
        TenantFixtures::lira_tenant()
            .with_timezone(core_kernel::Timezone::new(chrono_tz::Europe::Istanbul))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The business date most scenarios run on
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    /// A due date safely in the future of [`TemporalFixtures::today`]
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    /// A due date already past as of [`TemporalFixtures::today`]
    pub fn past_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
    }

    /// A deterministic creation instant, offset in seconds for ordering
    pub fn created_at(offset: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000 + offset, 0).unwrap()
    }
}

/// Fixture for document references
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A sales-invoice reference on the standard business date
    pub fn sales_reference(sequence: u32) -> DocumentRef {
        DocumentRef::from_sequence(DocumentType::SalesInvoice, TemporalFixtures::today(), sequence)
    }

    /// A collection reference on the standard business date
    pub fn collection_reference(sequence: u32) -> DocumentRef {
        DocumentRef::from_sequence(DocumentType::Collection, TemporalFixtures::today(), sequence)
    }
}
