//! Deadline enforcement driven by a scripted clock.

use super::helpers::{Engine, engine};
use folio::config::keys;
use folio::identity::domain::Role;
use folio::task::{
    domain::{Submission, TaskStatus},
    services::CreateTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lapsed_task_goes_overdue_and_can_still_be_submitted(engine: Engine) {
    engine.set(keys::OVERDUE_HOURS, "48").await;
    let admin = engine.join("admin", Role::Admin).await;
    let translator = engine.join("u1", Role::Member).await;
    let work = engine
        .registry
        .create_work(&admin, "Naruto")
        .await
        .expect("work created");
    let task = engine
        .registry
        .create_task(&admin, CreateTaskRequest::new(work.id(), 12))
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

    engine.clock.advance_hours(47);
    let early = engine.sweeper.sweep_once().await.expect("sweep");
    assert_eq!(early.marked_overdue(), 0);

    engine.clock.advance_hours(2);
    let late = engine.sweeper.sweep_once().await.expect("sweep");
    assert_eq!(late.marked_overdue(), 1);
    let overdue = engine.registry.get_task(task.id()).await.expect("task");
    assert_eq!(overdue.status(), TaskStatus::Overdue);

    let submitted = engine
        .lifecycle
        .submit(
            &translator,
            task.id(),
            Submission::new("translation").expect("valid work type"),
        )
        .await
        .expect("overdue task accepts a submission");
    assert_eq!(submitted.status(), TaskStatus::Submitted);
}
