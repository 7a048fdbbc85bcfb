//! Payout and bonus entries recorded against registered identities.

use super::helpers::{Engine, engine, identity_key};
use folio::error::ErrorKind;
use folio::identity::domain::Role;
use folio::ledger::domain::{TransactionKind, TransactionStatus};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payout_is_recorded_pending_then_settled(engine: Engine) {
    engine.join("u1", Role::Member).await;
    let beneficiary = identity_key("u1");

    let payout = engine
        .ledger
        .request_payout(&beneficiary, 250)
        .await
        .expect("payout recorded");
    assert_eq!(payout.kind(), TransactionKind::Payout);
    assert_eq!(payout.status(), TransactionStatus::Pending);

    let paid = engine
        .ledger
        .settle(payout.id(), TransactionStatus::Paid)
        .await
        .expect("payout settled");
    assert_eq!(paid.status(), TransactionStatus::Paid);

    let again = engine
        .ledger
        .settle(payout.id(), TransactionStatus::Canceled)
        .await
        .expect_err("settled entry is final");
    assert_eq!(again.kind(), ErrorKind::InvalidTransition);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_are_listed_newest_first(engine: Engine) {
    engine.join("u1", Role::Member).await;
    let beneficiary = identity_key("u1");

    engine
        .ledger
        .record_bonus(&beneficiary, 100)
        .await
        .expect("bonus recorded");
    engine.clock.advance_seconds(60);
    engine
        .ledger
        .request_payout(&beneficiary, 40)
        .await
        .expect("payout recorded");

    let kinds: Vec<TransactionKind> = engine
        .ledger
        .transactions_for(&beneficiary)
        .await
        .expect("entries")
        .iter()
        .map(|entry| entry.kind())
        .collect();
    assert_eq!(kinds, vec![TransactionKind::Payout, TransactionKind::Bonus]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payout_for_unregistered_identity_is_not_found(engine: Engine) {
    let err = engine
        .ledger
        .request_payout(&identity_key("ghost"), 10)
        .await
        .expect_err("unknown identity");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
