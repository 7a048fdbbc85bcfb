//! A chapter taken from creation through review.

use super::helpers::{Engine, engine, identity_key};
use folio::error::ErrorKind;
use folio::identity::domain::Role;
use folio::task::{
    domain::{ReviewDecision, Submission, TaskStatus},
    services::{CreateTaskRequest, ReviewRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_chapter_credits_assignee_and_releases_designation(engine: Engine) {
    let admin = engine.join("admin", Role::Admin).await;
    let reviewer = engine.join("rev", Role::Reviewer).await;
    let translator = engine.join("u1", Role::Member).await;

    let work = engine
        .registry
        .create_work(&admin, "Naruto")
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
    let started = engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("started");
    assert_eq!(started.status(), TaskStatus::InProgress);
    assert!(started.due_at().is_some());

    engine
        .lifecycle
        .submit(
            &translator,
            task.id(),
            Submission::new("translation")
                .expect("valid work type")
                .with_link("https://drive.example/ch1"),
        )
        .await
        .expect("submitted");
    let outcome = engine
        .review
        .review(
            &reviewer,
            ReviewRequest::new(task.id(), ReviewDecision::Accept).with_points(20),
        )
        .await
        .expect("accepted");

    assert_eq!(outcome.task().status(), TaskStatus::Accepted);
    assert_eq!(outcome.task().link(), Some("https://drive.example/ch1"));
    let credit = outcome.credit().expect("assignee credited");
    assert_eq!(credit.points(), 20);
    assert_eq!(credit.amount_minor(), 67);
    assert_eq!(engine.totals("u1").await, (20, 67));

    let release = outcome.released().expect("designation released");
    assert_eq!(release.assignee(), &identity_key("u1"));
    assert_eq!(release.role_label(), "Naruto");
    assert_eq!(engine.releases.drain().len(), 1);

    let summary = engine.registry.summary().await.expect("summary");
    assert_eq!(summary.accepted(), 1);
    assert_eq!(summary.total(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_assignee_may_start_and_submit(engine: Engine) {
    let admin = engine.join("admin", Role::Admin).await;
    let translator = engine.join("u1", Role::Member).await;
    let outsider = engine.join("u2", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Bleach")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 3))
        .await
        .expect("task created");
    engine
        .lifecycle
        .assign(&admin, task.id(), "u1")
        .await
        .expect("assigned");

    let denied_start = engine
        .lifecycle
        .start(&outsider, task.id())
        .await
        .expect_err("outsider start must fail");
    assert_eq!(denied_start.kind(), ErrorKind::Unauthorized);

    engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("assignee starts");
    let denied_submit = engine
        .lifecycle
        .submit(
            &outsider,
            task.id(),
            Submission::new("proofread").expect("valid work type"),
        )
        .await
        .expect_err("outsider submit must fail");
    assert_eq!(denied_submit.kind(), ErrorKind::Unauthorized);

    let stored = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert_eq!(stored.work_type(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_names_are_unique_ignoring_case(engine: Engine) {
    let admin = engine.join("admin", Role::Admin).await;
    engine
        .registry
        .create_work(&admin, "Naruto")
        .await
        .expect("first work created");

    let err = engine
        .registry
        .create_work(&admin, "naruto")
        .await
        .expect_err("case-insensitive duplicate must fail");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(engine.registry.list_works().await.expect("works").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_keeps_reason_and_credits_nothing(engine: Engine) {
    let admin = engine.join("admin", Role::Admin).await;
    let reviewer = engine.join("rev", Role::Reviewer).await;
    let translator = engine.join("u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "One Piece")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 1000))
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
            Submission::new("typeset").expect("valid work type"),
        )
        .await
        .expect("submitted");

    let outcome = engine
        .review
        .review(
            &reviewer,
            ReviewRequest::from_action(task.id(), "reject")
                .expect("known action")
                .with_reason("blurry scans"),
        )
        .await
        .expect("rejected");

    assert_eq!(outcome.task().status(), TaskStatus::Rejected);
    assert_eq!(outcome.task().review_note(), Some("blurry scans"));
    assert!(outcome.credit().is_none());
    assert_eq!(engine.totals("u1").await, (0, 0));
    let entries = engine
        .ledger
        .transactions_for(&identity_key("u1"))
        .await
        .expect("entries");
    assert!(entries.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chapter_survives_outsider_and_lapsed_deadline_before_acceptance(engine: Engine) {
    let admin = engine.join("admin", Role::Admin).await;
    let reviewer = engine.join("rev", Role::Reviewer).await;
    let translator = engine.join("u1", Role::Member).await;
    let outsider = engine.join("u2", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Naruto")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 1))
        .await
        .expect("task created");
    assert_eq!(task.status(), TaskStatus::Open);

    engine
        .lifecycle
        .assign(&admin, task.id(), "u1")
        .await
        .expect("assigned");
    let started = engine
        .lifecycle
        .start(&translator, task.id())
        .await
        .expect("started");
    assert_eq!(
        started.due_at(),
        Some(super::helpers::start_time() + chrono::TimeDelta::hours(24))
    );
    let denied = engine
        .lifecycle
        .start(&outsider, task.id())
        .await
        .expect_err("outsider start must fail");
    assert_eq!(denied.kind(), ErrorKind::Unauthorized);

    engine.clock.advance_hours(25);
    engine.sweeper.sweep_once().await.expect("sweep");
    let overdue = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(overdue.status(), TaskStatus::Overdue);

    engine
        .lifecycle
        .submit(
            &translator,
            task.id(),
            Submission::new("translation").expect("valid work type"),
        )
        .await
        .expect("submitted");
    let outcome = engine
        .review
        .review(
            &reviewer,
            ReviewRequest::new(task.id(), ReviewDecision::Accept).with_points(20),
        )
        .await
        .expect("accepted");

    assert_eq!(outcome.task().status(), TaskStatus::Accepted);
    assert_eq!(engine.totals("u1").await, (20, 67));
}
