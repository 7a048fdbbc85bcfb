//! Engine flows over `PostgreSQL` adapters.

use super::helpers::{PgEngine, database_url, fresh_pool, schema_guard};
use diesel::connection::SimpleConnection;
use diesel::{Connection, PgConnection};
use folio::config::{keys, ports::SettingRepository};
use folio::error::ErrorKind;
use folio::identity::{
    domain::{Caller, IdentityKey, Role},
    services::RegisterIdentityRequest,
};
use folio::ledger::domain::TransactionStatus;
use folio::task::{
    domain::{ReviewDecision, Submission, TaskStatus},
    services::{CreateTaskRequest, ReviewRequest},
};

async fn join(engine: &PgEngine, key: &str, role: Role) -> Caller {
    let identity = engine
        .identities
        .register_or_touch(RegisterIdentityRequest::new(key, key).with_role(role))
        .await
        .expect("identity registered");
    Caller::new(identity.key().clone(), role)
}

#[tokio::test(flavor = "multi_thread")]
async fn chapter_flow_persists_credit_and_status() {
    let Some(url) = database_url() else {
        return;
    };
    let _guard = schema_guard().await;
    let pool = fresh_pool(&url).expect("schema reset");
    let engine = PgEngine::new(&pool);

    let admin = join(&engine, "admin", Role::Admin).await;
    let reviewer = join(&engine, "rev", Role::Reviewer).await;
    let translator = join(&engine, "u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Naruto")
        .await
        .expect("work created");
    let duplicate = engine
        .registry
        .create_work(&admin, "NARUTO")
        .await
        .expect_err("duplicate name");
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 1))
        .await
        .expect("task created");
    engine
        .lifecycle
        .assign(&admin, task.id(), "u1")
        .await
        .expect("assigned");
    engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("started");
    engine
        .lifecycle
        .submit(
            &translator,
            task.id(),
            Submission::new("translation")
                .expect("valid work type")
                .with_link("https://drive.example/1"),
        )
        .await
        .expect("submitted");
    engine
        .review
        .review(
            &reviewer,
            ReviewRequest::new(task.id(), ReviewDecision::Accept).with_points(20),
        )
        .await
        .expect("accepted");

    let stored = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Accepted);
    assert_eq!(stored.work_type(), Some("translation"));
    assert_eq!(stored.link(), Some("https://drive.example/1"));
    let identity = engine
        .identities
        .get(translator.identity())
        .await
        .expect("identity");
    assert_eq!((identity.points(), identity.balance_minor()), (20, 67));
}

#[tokio::test(flavor = "multi_thread")]
async fn sweeper_and_settings_use_stored_values() {
    let Some(url) = database_url() else {
        return;
    };
    let _guard = schema_guard().await;
    let pool = fresh_pool(&url).expect("schema reset");
    let engine = PgEngine::new(&pool);

    engine
        .settings
        .put(keys::OVERDUE_HOURS, "2")
        .await
        .expect("setting stored");
    assert_eq!(
        engine
            .settings
            .get(keys::OVERDUE_HOURS)
            .await
            .expect("setting read"),
        Some("2".to_owned())
    );

    let admin = join(&engine, "admin", Role::Admin).await;
    let translator = join(&engine, "u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Bleach")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 5))
        .await
        .expect("task created");
    engine
        .lifecycle
        .assign(&admin, task.id(), "u1")
        .await
        .expect("assigned");
    engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("started");

    engine.clock.advance_hours(3);
    let report = engine.sweeper.sweep_once().await.expect("sweep");

    assert_eq!(report.marked_overdue(), 1);
    let overdue = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(overdue.status(), TaskStatus::Overdue);
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_skips_undecodable_row_and_marks_the_rest() {
    let Some(url) = database_url() else {
        return;
    };
    let _guard = schema_guard().await;
    let pool = fresh_pool(&url).expect("schema reset");
    let engine = PgEngine::new(&pool);

    let admin = join(&engine, "admin", Role::Admin).await;
    let translator = join(&engine, "u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Vinland")
        .await
        .expect("work created");
    let mut started = Vec::new();
    for chapter in [1, 2] {
        let task = engine
            .registry
            .create_task(&admin, CreateTaskRequest::new(work.id(), chapter))
            .await
            .expect("task created");
        engine
            .lifecycle
            .assign(&admin, task.id(), "u1")
            .await
            .expect("assigned");
        engine
            .lifecycle
            .start(&translator, task.id())
            .await
            .expect("started");
        started.push(task.id());
    }
    let [broken, healthy] = started.as_slice() else {
        panic!("expected two started tasks");
    };

    let mut connection = PgConnection::establish(&url).expect("connection");
    connection
        .batch_execute(&format!(
            "UPDATE tasks SET assignee = '' WHERE id = '{}'",
            broken.into_inner()
        ))
        .expect("row corrupted");

    engine.clock.advance_hours(25);
    let report = engine.sweeper.sweep_once().await.expect("sweep");

    assert_eq!(report.examined(), 2);
    assert_eq!(report.marked_overdue(), 1);
    assert_eq!(report.failed(), 1);
    let swept = engine.registry.get_task(*healthy).await.expect("task");
    assert_eq!(swept.status(), TaskStatus::Overdue);
}

#[tokio::test(flavor = "multi_thread")]
async fn overflowing_credit_leaves_task_submitted() {
    let Some(url) = database_url() else {
        return;
    };
    let _guard = schema_guard().await;
    let pool = fresh_pool(&url).expect("schema reset");
    let engine = PgEngine::new(&pool);

    let admin = join(&engine, "admin", Role::Admin).await;
    let reviewer = join(&engine, "rev", Role::Reviewer).await;
    let translator = join(&engine, "u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Berserk")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 1))
        .await
        .expect("task created");
    engine
        .lifecycle
        .assign(&admin, task.id(), "u1")
        .await
        .expect("assigned");
    engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("started");
    engine
        .lifecycle
        .submit(
            &translator,
            task.id(),
            Submission::new("translation").expect("valid work type"),
        )
        .await
        .expect("submitted");

    let mut connection = PgConnection::establish(&url).expect("connection");
    connection
        .batch_execute(
            "UPDATE identities SET balance_minor = 9223372036854775800 \
             WHERE identity_key = 'u1'",
        )
        .expect("balance seeded");

    let err = engine
        .review
        .review(
            &reviewer,
            ReviewRequest::new(task.id(), ReviewDecision::Accept).with_points(20),
        )
        .await
        .expect_err("credit overflows");

    assert_eq!(err.kind(), ErrorKind::Internal);
    let stored = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Submitted);
    let identity = engine
        .identities
        .get(translator.identity())
        .await
        .expect("identity");
    assert_eq!(identity.points(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn ledger_entries_settle_once() {
    let Some(url) = database_url() else {
        return;
    };
    let _guard = schema_guard().await;
    let pool = fresh_pool(&url).expect("schema reset");
    let engine = PgEngine::new(&pool);
    join(&engine, "u1", Role::Member).await;
    let beneficiary = IdentityKey::new("u1").expect("valid key");

    let payout = engine
        .ledger
        .request_payout(&beneficiary, 500)
        .await
        .expect("payout recorded");
    engine
        .ledger
        .settle(payout.id(), TransactionStatus::Paid)
        .await
        .expect("settled");
    let err = engine
        .ledger
        .settle(payout.id(), TransactionStatus::Canceled)
        .await
        .expect_err("already settled");

    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    let entries = engine
        .ledger
        .transactions_for(&beneficiary)
        .await
        .expect("entries");
    assert_eq!(entries.len(), 1);
    assert!(
        entries
            .iter()
            .all(|entry| entry.status() == TransactionStatus::Paid)
    );
}
