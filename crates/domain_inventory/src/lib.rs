//! Inventory Domain - Stock Movements
//!
//! Stock here is a collaborator of the ledger, not a subledger of its own:
//! every In/Out movement that belongs to a trade event carries the event's
//! document reference, and the coordinator writes it in the same unit of
//! work as the posting it correlates with. On-hand quantity is the signed
//! sum of a product's movements.

pub mod movement;
pub mod ports;
pub mod error;

pub use movement::{ensure_available, on_hand_of, StockDirection, StockMovement};
pub use ports::StockStore;
pub use error::InventoryError;
