//! Instrument store port

use async_trait::async_trait;

use core_kernel::{InstrumentId, StoreError};

use crate::endorsement::Endorsement;
use crate::instrument::Instrument;

/// Row access for instruments and their endorsement log
#[async_trait]
pub trait InstrumentStore: Send {
    async fn instrument(&mut self, id: InstrumentId) -> Result<Option<Instrument>, StoreError>;

    async fn insert_instrument(&mut self, row: Instrument) -> Result<(), StoreError>;

    /// Rewrites an instrument row (state, custodian, deposit target)
    async fn update_instrument(&mut self, row: Instrument) -> Result<(), StoreError>;

    /// Appends to the endorsement log; rows are never updated or deleted
    async fn insert_endorsement(&mut self, row: Endorsement) -> Result<(), StoreError>;

    /// The endorsement log of one instrument, in append order
    async fn endorsements_of(
        &mut self,
        id: InstrumentId,
    ) -> Result<Vec<Endorsement>, StoreError>;
}
