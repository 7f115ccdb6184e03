//! Ledger Domain - Counterparty Current Accounts
//!
//! This crate implements the single-entry "DEBT/CREDIT per counterparty"
//! model: every posting either raises what a counterparty owes the tenant
//! (debt) or lowers it (credit), and a counterparty's balance is the signed
//! sum of its postings in one deterministic order.
//!
//! # Balance Rule
//!
//! `balance = Σ(debt amounts) − Σ(credit amounts)`, folded in ascending
//! `(created_at, id)` order. A positive balance means the counterparty owes
//! the tenant; a negative balance means the tenant owes the counterparty.
//!
//! The cached balance on the counterparty row is a materialized view: every
//! write path updates it in the same unit of work, and [`AccountLedgerService::balance_of`]
//! revalidates it against a full recompute on every read.

pub mod counterparty;
pub mod entry;
pub mod service;
pub mod ports;
pub mod error;

pub use counterparty::{Counterparty, CounterpartyKind, CreditExposure};
pub use entry::{EntryDirection, Posting, StatementLine};
pub use service::AccountLedgerService;
pub use ports::PostingStore;
pub use error::LedgerError;
