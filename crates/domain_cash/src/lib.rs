//! Cash Domain - Cash and Bank Accounts
//!
//! An account's balance equals the signed sum of its movements; the
//! coordinator writes each movement and the balance it implies in the same
//! unit of work. A transfer is two paired movements - one out of the source
//! account, one into the target - created together or not at all.

pub mod account;
pub mod movement;
pub mod ports;
pub mod error;

pub use account::CashAccount;
pub use movement::{CashDirection, CashMovement};
pub use ports::CashStore;
pub use error::CashError;
