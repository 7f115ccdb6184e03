//! Instrument Domain - Negotiable Checks and Drafts
//!
//! Tracks an instrument from the portfolio through endorsement, deposit and
//! clearing. Two rules hold everywhere:
//!
//! - An instrument has exactly one current custodian and one current state;
//!   the stored state is authoritative and is never recomputed from history.
//! - The endorsement log is append-only evidence of custody: replaying it
//!   must reproduce the stored custodian, and
//!   [`InstrumentService::verify_custody`] checks exactly that.
//!
//! Instruments are atomic - they are endorsed whole, never split.

pub mod instrument;
pub mod endorsement;
pub mod service;
pub mod ports;
pub mod error;

pub use instrument::{Instrument, InstrumentDirection, InstrumentState, Transition};
pub use endorsement::{replay_custody, Endorsement};
pub use service::InstrumentService;
pub use ports::InstrumentStore;
pub use error::InstrumentError;
