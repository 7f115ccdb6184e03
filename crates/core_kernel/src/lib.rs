//! Core Kernel - Foundational types for the back-office ledger core
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Document references shared between postings, stock and cash movements
//! - Tenant configuration and business-date handling
//! - The store-port error type consumed by every domain port

pub mod money;
pub mod identifiers;
pub mod document;
pub mod temporal;
pub mod config;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{
    TenantId, CounterpartyId, PostingId, InstrumentId, EndorsementId,
    ProductId, StockMovementId, CashAccountId, CashMovementId, EventId,
};
pub use document::{DocumentType, DocumentRef};
pub use temporal::Timezone;
pub use config::TenantConfig;
pub use ports::{StoreError, DomainPort};
