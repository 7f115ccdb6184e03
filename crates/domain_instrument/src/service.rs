//! Instrument service
//!
//! Read-and-validate helper over the instrument store; invoked inside the
//! coordinator's transaction, never outside it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error};

use core_kernel::{CashAccountId, CounterpartyId, InstrumentId, TenantConfig};

use crate::endorsement::{replay_custody, Endorsement};
use crate::error::InstrumentError;
use crate::instrument::Instrument;
use crate::ports::InstrumentStore;

/// Service over instruments and their custody log
#[derive(Debug, Clone)]
pub struct InstrumentService {
    config: TenantConfig,
}

impl InstrumentService {
    pub fn new(config: TenantConfig) -> Self {
        Self { config }
    }

    /// Takes a new instrument into the books
    pub async fn register<S>(
        &self,
        store: &mut S,
        instrument: Instrument,
    ) -> Result<InstrumentId, InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        instrument.amount.ensure_currency(self.config.currency)?;
        if !instrument.amount.is_positive() {
            return Err(InstrumentError::InvalidAmount(instrument.amount.amount()));
        }
        let id = instrument.id;
        store.insert_instrument(instrument).await?;
        Ok(id)
    }

    /// Transfers custody and appends the endorsement record
    pub async fn endorse<S>(
        &self,
        store: &mut S,
        id: InstrumentId,
        to: CounterpartyId,
        date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Result<Endorsement, InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let mut instrument = self.resolve(store, id).await?;
        let endorsement = instrument.endorse_to(to, date, recorded_at)?;

        store.insert_endorsement(endorsement.clone()).await?;
        store.update_instrument(instrument).await?;

        debug!(instrument = %id, %to, "instrument endorsed");
        Ok(endorsement)
    }

    /// Hands the instrument to a bank for collection
    pub async fn deposit<S>(
        &self,
        store: &mut S,
        id: InstrumentId,
        account: CashAccountId,
    ) -> Result<(), InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let mut instrument = self.resolve(store, id).await?;
        instrument.deposit(account)?;
        store.update_instrument(instrument).await?;
        Ok(())
    }

    /// The bank collected the face amount
    pub async fn clear<S>(&self, store: &mut S, id: InstrumentId) -> Result<(), InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let mut instrument = self.resolve(store, id).await?;
        instrument.clear()?;
        store.update_instrument(instrument).await?;
        Ok(())
    }

    /// The bank bounced the instrument
    pub async fn bounce<S>(&self, store: &mut S, id: InstrumentId) -> Result<(), InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let mut instrument = self.resolve(store, id).await?;
        instrument.bounce()?;
        store.update_instrument(instrument).await?;
        Ok(())
    }

    /// Formal protest after a bounce
    pub async fn protest<S>(&self, store: &mut S, id: InstrumentId) -> Result<(), InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let mut instrument = self.resolve(store, id).await?;
        instrument.protest()?;
        store.update_instrument(instrument).await?;
        Ok(())
    }

    /// The custody log of an instrument, in append order
    pub async fn custody_history<S>(
        &self,
        store: &mut S,
        id: InstrumentId,
    ) -> Result<Vec<Endorsement>, InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        self.resolve(store, id).await?;
        Ok(store.endorsements_of(id).await?)
    }

    /// Checks that replaying the custody log lands on the stored custodian
    ///
    /// A mismatch is a consistency bug; it is surfaced, never repaired by
    /// rewriting either side.
    pub async fn verify_custody<S>(
        &self,
        store: &mut S,
        id: InstrumentId,
    ) -> Result<(), InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        let instrument = self.resolve(store, id).await?;
        let log = store.endorsements_of(id).await?;
        let replayed = replay_custody(instrument.origin_counterparty_id, &log)?;

        if replayed != instrument.counterparty_id {
            error!(
                instrument = %id,
                stored = %instrument.counterparty_id,
                %replayed,
                "custody log disagrees with stored custodian"
            );
            return Err(InstrumentError::CustodyMismatch {
                instrument: id,
                stored: instrument.counterparty_id,
                replayed,
            });
        }
        Ok(())
    }

    async fn resolve<S>(
        &self,
        store: &mut S,
        id: InstrumentId,
    ) -> Result<Instrument, InstrumentError>
    where
        S: InstrumentStore + ?Sized,
    {
        store
            .instrument(id)
            .await?
            .ok_or(InstrumentError::UnknownInstrument(id))
    }
}
