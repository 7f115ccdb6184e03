//! Endorsement custody records
//!
//! Append-only: an endorsement row is written once and never mutated or
//! deleted. The log is evidence of custody history, not the source of the
//! current state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CounterpartyId, EndorsementId, InstrumentId, Money};

use crate::error::InstrumentError;

/// One custody transfer of an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endorsement {
    /// Unique identifier
    pub id: EndorsementId,
    /// Instrument transferred
    pub instrument_id: InstrumentId,
    /// Custodian handing the instrument over
    pub from_counterparty_id: CounterpartyId,
    /// Custodian taking the instrument
    pub to_counterparty_id: CounterpartyId,
    /// Business date of the transfer
    pub date: NaiveDate,
    /// Face amount at transfer; always equals the instrument's amount
    pub amount: Money,
    /// Append instant; orders the log
    pub recorded_at: DateTime<Utc>,
}

impl Endorsement {
    pub fn new(
        instrument_id: InstrumentId,
        from: CounterpartyId,
        to: CounterpartyId,
        date: NaiveDate,
        amount: Money,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EndorsementId::new_v7(),
            instrument_id,
            from_counterparty_id: from,
            to_counterparty_id: to,
            date,
            amount,
            recorded_at,
        }
    }
}

/// Replays an endorsement log from the original custodian
///
/// Returns the custodian the log ends at. Fails if the chain does not hand
/// over continuously (each transfer must start where the previous ended).
/// The log must be in append order.
pub fn replay_custody(
    origin: CounterpartyId,
    log: &[Endorsement],
) -> Result<CounterpartyId, InstrumentError> {
    let mut holder = origin;
    for endorsement in log {
        if endorsement.from_counterparty_id != holder {
            return Err(InstrumentError::BrokenCustodyChain {
                instrument: endorsement.instrument_id,
                expected: holder,
                found: endorsement.from_counterparty_id,
            });
        }
        holder = endorsement.to_counterparty_id;
    }
    Ok(holder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn endorsement(
        instrument: InstrumentId,
        from: CounterpartyId,
        to: CounterpartyId,
    ) -> Endorsement {
        Endorsement::new(
            instrument,
            from,
            to,
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            Money::new(dec!(500), Currency::TRY),
            Utc::now(),
        )
    }

    #[test]
    fn test_replay_empty_log_stays_at_origin() {
        let origin = CounterpartyId::new();
        assert_eq!(replay_custody(origin, &[]).unwrap(), origin);
    }

    #[test]
    fn test_replay_follows_the_chain() {
        let instrument = InstrumentId::new();
        let a = CounterpartyId::new();
        let b = CounterpartyId::new();
        let c = CounterpartyId::new();

        let log = vec![endorsement(instrument, a, b), endorsement(instrument, b, c)];
        assert_eq!(replay_custody(a, &log).unwrap(), c);
    }

    #[test]
    fn test_replay_rejects_a_gap() {
        let instrument = InstrumentId::new();
        let a = CounterpartyId::new();
        let b = CounterpartyId::new();
        let c = CounterpartyId::new();

        // b -> c without a -> b first
        let log = vec![endorsement(instrument, b, c)];
        assert!(matches!(
            replay_custody(a, &log),
            Err(InstrumentError::BrokenCustodyChain { .. })
        ));
    }
}
