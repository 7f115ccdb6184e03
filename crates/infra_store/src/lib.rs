//! Infrastructure Store Layer
//!
//! The ledger core consumes a transactional relational store through the
//! ports in `app_coordinator::store`; it does not implement one. This crate
//! ships the reference adapter: an in-memory store whose units of work are
//! serializable by construction (one unit holds the store for its whole
//! lifetime). It fixes the adapter contract - buffered writes, atomic
//! publish on commit, loud conflicts on duplicate references - and gives
//! the test suite a store that behaves like the real thing under
//! concurrency.

pub mod memory;

pub use memory::{MemoryStore, MemoryUnitOfWork};
