//! Custom assertion helpers for domain invariants

use core_kernel::Currency;
use domain_instrument::{replay_custody, Endorsement, Instrument};
use domain_ledger::{entry, Posting, StatementLine};

/// Asserts that a statement is internally consistent: every line's balance
/// follows from the previous line and the posting on it
pub fn assert_statement_consistent(lines: &[StatementLine], currency: Currency) {
    let mut expected = core_kernel::Money::zero(currency);
    for line in lines {
        expected = entry::apply(expected, &line.posting);
        assert_eq!(
            line.balance_after, expected,
            "statement line for posting {} breaks the running balance",
            line.posting.id
        );
    }
}

/// Asserts that a posting history and a claimed balance agree
pub fn assert_balance_reconciles(
    postings: &[Posting],
    claimed: core_kernel::Money,
    currency: Currency,
) {
    let computed = entry::balance_of(postings, currency);
    assert_eq!(
        computed, claimed,
        "claimed balance {} does not reconcile with recomputed {}",
        claimed, computed
    );
}

/// Asserts that an instrument's endorsement log replays onto its stored
/// custodian
pub fn assert_custody_consistent(instrument: &Instrument, log: &[Endorsement]) {
    let replayed = replay_custody(instrument.origin_counterparty_id, log)
        .expect("custody chain must hand over continuously");
    assert_eq!(
        replayed, instrument.counterparty_id,
        "endorsement log replays onto {} but instrument is held by {}",
        replayed, instrument.counterparty_id
    );
}
