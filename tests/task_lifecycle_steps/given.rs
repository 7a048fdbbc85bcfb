//! Given steps for chapter task lifecycle scenarios.

use super::world::{LifecycleWorld, run_async};
use folio::config::{keys, ports::SettingRepository};
use folio::identity::{
    domain::{Caller, Role},
    services::RegisterIdentityRequest,
};
use folio::task::{domain::Submission, services::CreateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered {role} "{key}""#)]
fn registered_actor(
    world: &mut LifecycleWorld,
    role: String,
    key: String,
) -> Result<(), eyre::Report> {
    let parsed = Role::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    let request = RegisterIdentityRequest::new(key.as_str(), key.as_str()).with_role(parsed);
    let identity = run_async(world.identities.register_or_touch(request))
        .wrap_err("register scenario actor")?;
    world
        .callers
        .insert(key, Caller::new(identity.key().clone(), parsed));
    Ok(())
}

#[given(r#"a work named "{name}""#)]
fn work_named(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let admin = world.caller("admin")?;
    let work = run_async(world.registry.create_work(&admin, &name)).wrap_err("create work")?;
    world.works.insert(name, work.id());
    Ok(())
}

#[given(r#"the transition policy is "{policy}""#)]
fn transition_policy(world: &mut LifecycleWorld, policy: String) -> Result<(), eyre::Report> {
    run_async(world.settings.put(keys::TRANSITION_POLICY, &policy))
        .wrap_err("store transition policy")?;
    Ok(())
}

#[given(r#"chapter {chapter:u32} of "{name}" is assigned to "{assignee}""#)]
fn chapter_assigned(
    world: &mut LifecycleWorld,
    chapter: u32,
    name: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let admin = world.caller("admin")?;
    let work_id = *world
        .works
        .get(&name)
        .ok_or_else(|| eyre::eyre!("missing work {name} in scenario world"))?;
    let task = run_async(
        world
            .registry
            .create_task(&admin, CreateTaskRequest::new(work_id, chapter)),
    )
    .wrap_err("create chapter task")?;
    run_async(world.lifecycle.assign(&admin, task.id(), &assignee)).wrap_err("assign chapter")?;
    world.current_task = Some(task.id());
    Ok(())
}

#[given(r#""{key}" starts the chapter"#)]
fn chapter_started(world: &mut LifecycleWorld, key: String) -> Result<(), eyre::Report> {
    let caller = world.caller(&key)?;
    let task = world.task()?;
    run_async(world.lifecycle.start(&caller, task)).wrap_err("start chapter")?;
    Ok(())
}

#[given(r#""{key}" submits the chapter as "{work_type}""#)]
fn chapter_submitted(
    world: &mut LifecycleWorld,
    key: String,
    work_type: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&key)?;
    let task = world.task()?;
    let submission = Submission::new(work_type).wrap_err("build submission")?;
    run_async(world.lifecycle.submit(&caller, task, submission)).wrap_err("submit chapter")?;
    Ok(())
}
