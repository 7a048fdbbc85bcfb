//! Then steps for chapter task lifecycle scenarios.

use super::world::{LifecycleWorld, run_async};
use folio::identity::domain::IdentityKey;
use folio::task::domain::TaskStatus;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"the chapter status is "{status}""#)]
fn chapter_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = run_async(world.registry.get_task(world.task()?)).wrap_err("load chapter")?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        task.status().as_str()
    );
    Ok(())
}

#[then(r#""{key}" has {points:u64} points and a balance of {balance:i64}"#)]
fn totals_are(
    world: &LifecycleWorld,
    key: String,
    points: u64,
    balance: i64,
) -> Result<(), eyre::Report> {
    let identity_key = IdentityKey::new(key).wrap_err("parse identity key")?;
    let identity =
        run_async(world.identities.get(&identity_key)).wrap_err("load identity totals")?;

    eyre::ensure!(
        identity.points() == points && identity.balance_minor() == balance,
        "expected {points} points and {balance} balance, found {} and {}",
        identity.points(),
        identity.balance_minor()
    );
    Ok(())
}

#[then(r#"the last action fails as "{kind}""#)]
fn last_action_fails_as(world: &LifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let actual = world
        .last_error
        .ok_or_else(|| eyre::eyre!("expected the last action to fail"))?;

    eyre::ensure!(
        actual.as_str() == kind,
        "expected {kind} failure, found {}",
        actual.as_str()
    );
    Ok(())
}
