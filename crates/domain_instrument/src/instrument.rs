//! Instrument aggregate and its state machine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CashAccountId, CounterpartyId, InstrumentId, Money};

use crate::endorsement::Endorsement;
use crate::error::InstrumentError;

/// Whether the tenant took the instrument in or wrote it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentDirection {
    /// Taken in from a counterparty (e.g., a customer's check)
    Received,
    /// Issued by the tenant (e.g., the tenant's own check to a supplier)
    Issued,
}

/// Lifecycle state of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentState {
    /// Held, available to endorse or deposit
    Portfolio,
    /// Mid-endorsement; hands over into the new custodian's portfolio
    Endorsed,
    /// Handed to a bank for collection
    Deposited,
    /// Collected by the bank (terminal)
    Cleared,
    /// Bounced by the bank
    Returned,
    /// Formally protested after bouncing (terminal)
    Protested,
}

/// Events that drive the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Endorse,
    /// The endorsed instrument re-enters the portfolio of the new custodian
    HandOver,
    Deposit,
    Clear,
    Bounce,
    Protest,
}

impl Transition {
    /// The state this transition lands in when legal
    pub fn target(&self) -> InstrumentState {
        match self {
            Transition::Endorse => InstrumentState::Endorsed,
            Transition::HandOver => InstrumentState::Portfolio,
            Transition::Deposit => InstrumentState::Deposited,
            Transition::Clear => InstrumentState::Cleared,
            Transition::Bounce => InstrumentState::Returned,
            Transition::Protest => InstrumentState::Protested,
        }
    }
}

impl InstrumentState {
    /// Applies a transition, fail-closed
    ///
    /// Any edge outside the diagram fails with `IllegalTransition` and
    /// performs no side effect.
    pub fn apply(self, transition: Transition) -> Result<InstrumentState, InstrumentError> {
        use InstrumentState::*;
        match (self, transition) {
            (Portfolio, Transition::Endorse)
            | (Endorsed, Transition::HandOver)
            | (Portfolio, Transition::Deposit)
            | (Deposited, Transition::Clear)
            | (Deposited, Transition::Bounce)
            | (Returned, Transition::Protest) => Ok(transition.target()),
            (from, t) => Err(InstrumentError::IllegalTransition {
                from,
                to: t.target(),
            }),
        }
    }

    /// True if no transition leaves this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstrumentState::Cleared | InstrumentState::Protested)
    }
}

/// A check or draft tracked by the tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique identifier; survives endorsement
    pub id: InstrumentId,
    /// Current custodian
    pub counterparty_id: CounterpartyId,
    /// Custodian at creation; anchor of the custody replay
    pub origin_counterparty_id: CounterpartyId,
    /// Printed serial of the physical instrument
    pub instrument_no: String,
    /// Drawee bank
    pub bank: String,
    /// Face amount; instruments are never split
    pub amount: Money,
    /// Maturity date
    pub due_date: NaiveDate,
    /// Received or issued
    pub direction: InstrumentDirection,
    /// Current state (authoritative)
    pub state: InstrumentState,
    /// Bank account the instrument was deposited to, once deposited
    pub deposited_to: Option<CashAccountId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Instrument {
    pub fn new(
        counterparty_id: CounterpartyId,
        instrument_no: impl Into<String>,
        bank: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
        direction: InstrumentDirection,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: InstrumentId::new_v7(),
            counterparty_id,
            origin_counterparty_id: counterparty_id,
            instrument_no: instrument_no.into(),
            bank: bank.into(),
            amount,
            due_date,
            direction,
            state: InstrumentState::Portfolio,
            deposited_to: None,
            created_at,
        }
    }

    /// Transfers custody to another counterparty
    ///
    /// Legal only from the portfolio. The instrument leaves these books as
    /// `Endorsed` under the new custodian - semantically it now sits in the
    /// custodian's own portfolio, which is what [`Instrument::hand_over`]
    /// records when the instrument re-enters. Because `Endorsed` is not
    /// transferable, two settlements can never both endorse the same
    /// instrument out of the portfolio.
    pub fn endorse_to(
        &mut self,
        to: CounterpartyId,
        date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Result<Endorsement, InstrumentError> {
        if self.state != InstrumentState::Portfolio {
            return Err(InstrumentError::NotTransferable {
                instrument: self.id,
                state: self.state,
            });
        }

        let endorsed = self.state.apply(Transition::Endorse)?;
        let endorsement = Endorsement::new(self.id, self.counterparty_id, to, date, self.amount, recorded_at);
        self.counterparty_id = to;
        self.state = endorsed;
        Ok(endorsement)
    }

    /// Books an endorsed instrument back into the current custodian's
    /// portfolio (the implicit hand-over edge of the diagram)
    pub fn hand_over(&mut self) -> Result<(), InstrumentError> {
        self.state = self.state.apply(Transition::HandOver)?;
        Ok(())
    }

    /// Hands the instrument to a bank for collection
    pub fn deposit(&mut self, account: CashAccountId) -> Result<(), InstrumentError> {
        self.state = self.state.apply(Transition::Deposit)?;
        self.deposited_to = Some(account);
        Ok(())
    }

    /// The bank collected the face amount
    pub fn clear(&mut self) -> Result<(), InstrumentError> {
        self.state = self.state.apply(Transition::Clear)?;
        Ok(())
    }

    /// The bank bounced the instrument
    pub fn bounce(&mut self) -> Result<(), InstrumentError> {
        self.state = self.state.apply(Transition::Bounce)?;
        Ok(())
    }

    /// Formal protest after a bounce
    pub fn protest(&mut self) -> Result<(), InstrumentError> {
        self.state = self.state.apply(Transition::Protest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn check() -> Instrument {
        Instrument::new(
            CounterpartyId::new(),
            "0001234",
            "Ziraat",
            Money::new(dec!(500), Currency::TRY),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            InstrumentDirection::Received,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_instrument_enters_portfolio() {
        let i = check();
        assert_eq!(i.state, InstrumentState::Portfolio);
        assert_eq!(i.counterparty_id, i.origin_counterparty_id);
    }

    #[test]
    fn test_endorse_reattributes_custody_and_leaves_the_portfolio() {
        let mut i = check();
        let origin = i.counterparty_id;
        let holder = CounterpartyId::new();

        let endorsement = i
            .endorse_to(holder, NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(), Utc::now())
            .unwrap();

        assert_eq!(i.state, InstrumentState::Endorsed);
        assert_eq!(i.counterparty_id, holder);
        assert_eq!(i.origin_counterparty_id, origin);
        assert_eq!(endorsement.from_counterparty_id, origin);
        assert_eq!(endorsement.to_counterparty_id, holder);
        assert_eq!(endorsement.amount, i.amount);
    }

    #[test]
    fn test_endorsed_instrument_cannot_be_endorsed_again() {
        let mut i = check();
        i.endorse_to(
            CounterpartyId::new(),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            Utc::now(),
        )
        .unwrap();

        let second = i.endorse_to(
            CounterpartyId::new(),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            Utc::now(),
        );
        assert!(matches!(
            second,
            Err(InstrumentError::NotTransferable { state: InstrumentState::Endorsed, .. })
        ));
    }

    #[test]
    fn test_hand_over_reenters_the_new_holders_portfolio() {
        let mut i = check();
        let holder = CounterpartyId::new();
        i.endorse_to(holder, NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(), Utc::now())
            .unwrap();

        i.hand_over().unwrap();
        assert_eq!(i.state, InstrumentState::Portfolio);
        assert_eq!(i.counterparty_id, holder);

        // and from there the new holder can pass it on
        assert!(i
            .endorse_to(CounterpartyId::new(), NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(), Utc::now())
            .is_ok());
    }

    #[test]
    fn test_endorse_fails_outside_portfolio() {
        let mut i = check();
        i.deposit(CashAccountId::new()).unwrap();

        let result = i.endorse_to(
            CounterpartyId::new(),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(InstrumentError::NotTransferable { state: InstrumentState::Deposited, .. })
        ));
        // fail-closed: nothing changed
        assert_eq!(i.state, InstrumentState::Deposited);
    }

    #[test]
    fn test_deposit_clear_path() {
        let mut i = check();
        let account = CashAccountId::new();
        i.deposit(account).unwrap();
        assert_eq!(i.deposited_to, Some(account));
        i.clear().unwrap();
        assert_eq!(i.state, InstrumentState::Cleared);
        assert!(i.state.is_terminal());
    }

    #[test]
    fn test_deposit_bounce_protest_path() {
        let mut i = check();
        i.deposit(CashAccountId::new()).unwrap();
        i.bounce().unwrap();
        assert_eq!(i.state, InstrumentState::Returned);
        i.protest().unwrap();
        assert_eq!(i.state, InstrumentState::Protested);
        assert!(i.state.is_terminal());
    }

    #[test]
    fn test_deposit_from_returned_is_illegal() {
        let mut i = check();
        i.deposit(CashAccountId::new()).unwrap();
        i.bounce().unwrap();

        let result = i.deposit(CashAccountId::new());
        assert!(matches!(
            result,
            Err(InstrumentError::IllegalTransition {
                from: InstrumentState::Returned,
                to: InstrumentState::Deposited,
            })
        ));
        assert_eq!(i.state, InstrumentState::Returned);
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        let mut cleared = check();
        cleared.deposit(CashAccountId::new()).unwrap();
        cleared.clear().unwrap();
        assert!(cleared.clear().is_err());
        assert!(cleared.bounce().is_err());
        assert!(cleared.protest().is_err());
        assert!(cleared.deposit(CashAccountId::new()).is_err());

        let mut protested = check();
        protested.deposit(CashAccountId::new()).unwrap();
        protested.bounce().unwrap();
        protested.protest().unwrap();
        assert!(protested.protest().is_err());
        assert!(protested.deposit(CashAccountId::new()).is_err());
    }

    #[test]
    fn test_state_machine_exhaustive_matrix() {
        use InstrumentState::*;
        use Transition::*;
        let states = [Portfolio, Endorsed, Deposited, Cleared, Returned, Protested];
        let transitions = [Endorse, HandOver, Deposit, Clear, Bounce, Protest];
        let legal = [
            (Portfolio, Endorse),
            (Endorsed, HandOver),
            (Portfolio, Deposit),
            (Deposited, Clear),
            (Deposited, Bounce),
            (Returned, Protest),
        ];

        for state in states {
            for transition in transitions {
                let result = state.apply(transition);
                if legal.contains(&(state, transition)) {
                    assert!(result.is_ok(), "{:?} --{:?}-->", state, transition);
                } else {
                    assert!(result.is_err(), "{:?} --{:?}-->", state, transition);
                }
            }
        }
    }
}
