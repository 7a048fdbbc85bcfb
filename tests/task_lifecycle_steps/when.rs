//! When steps for chapter task lifecycle scenarios.

use super::world::{LifecycleWorld, run_async};
use folio::task::{
    domain::{ReviewDecision, Submission},
    services::{ReviewRequest, ReviewServiceError, TaskLifecycleError},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{key}" starts the chapter"#)]
fn start_chapter(world: &mut LifecycleWorld, key: String) -> Result<(), eyre::Report> {
    let caller = world.caller(&key)?;
    let task = world.task()?;
    let result = run_async(world.lifecycle.start(&caller, task));
    world.record(result, TaskLifecycleError::kind);
    Ok(())
}

#[when(r#""{key}" submits the chapter as "{work_type}""#)]
fn submit_chapter(
    world: &mut LifecycleWorld,
    key: String,
    work_type: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&key)?;
    let task = world.task()?;
    let submission = Submission::new(work_type).wrap_err("build submission")?;
    let result = run_async(world.lifecycle.submit(&caller, task, submission));
    world.record(result, TaskLifecycleError::kind);
    Ok(())
}

#[when(r#""{key}" accepts the chapter awarding {points:u32} points"#)]
fn accept_chapter(
    world: &mut LifecycleWorld,
    key: String,
    points: u32,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&key)?;
    let task = world.task()?;
    let request = ReviewRequest::new(task, ReviewDecision::Accept).with_points(points);
    let result = run_async(world.review.review(&caller, request));
    world.record(result, ReviewServiceError::kind);
    Ok(())
}

#[when("{hours:i64} hours pass and the sweeper runs")]
fn time_passes_and_sweeper_runs(
    world: &mut LifecycleWorld,
    hours: i64,
) -> Result<(), eyre::Report> {
    world.clock.advance_hours(hours);
    run_async(world.sweeper.sweep_once()).wrap_err("run deadline sweep")?;
    Ok(())
}
