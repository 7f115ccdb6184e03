//! Cross-Module Posting Coordinator
//!
//! A business event - a sale, a purchase, a collection, a payment, a cash
//! voucher - touches several tables at once: stock movements correlate with
//! a posting, an endorsement correlates with a posting, a cash movement
//! moves an account balance. This crate owns the rule that each such event
//! is ONE atomic unit: the coordinator begins the store transaction, runs
//! the domain services inside it, and commits everything or nothing.
//!
//! The coordinator is the only writer of postings and instrument-state
//! transitions. Concurrency control comes from the store: `begin` acquires
//! whatever isolation the adapter offers over the touched rows, so two
//! concurrent sales can never both draw the same stock past zero and two
//! concurrent endorsements can never both move the same instrument.
//!
//! Retries are safe: every event carries an idempotency key, and a key that
//! already committed replays its recorded receipt instead of posting again.

pub mod coordinator;
pub mod events;
pub mod numbering;
pub mod store;
pub mod error;

pub use coordinator::PostingCoordinator;
pub use events::{
    CashExpenseOrIncome, CashFlow, CashTransfer, CashVoucherReceipt, CollectionOrPayment,
    CommittedOutcome, IdempotencyKey, LineItem, SaleOrPurchase, SettlementFlow, SettlementMethod,
    SettlementReceipt, TradeDirection, TradeReceipt, TransferReceipt,
};
pub use numbering::next_reference;
pub use store::{TransactionalStore, UnitOfWork};
pub use error::CoordinatorError;
