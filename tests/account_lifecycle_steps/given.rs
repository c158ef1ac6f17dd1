//! Given steps for account lifecycle BDD scenarios.

use super::world::{AccountWorld, credentials, registration_body, run_async, task_body};
use rstest_bdd_macros::given;

#[given(r#"a registered user "{name}" with password "{password}""#)]
fn a_registered_user(
    world: &mut AccountWorld,
    name: String,
    password: String,
) -> Result<(), eyre::Report> {
    let response = run_async(world.api.create_user(&registration_body(&name, &password)));
    if !response.status.is_success() {
        return Err(eyre::eyre!("registering {name} failed: {response:?}"));
    }
    Ok(())
}

#[given(r#""{name}" with password "{password}" has created a task titled "{title}""#)]
fn user_has_created_task(
    world: &mut AccountWorld,
    name: String,
    password: String,
    title: String,
) -> Result<(), eyre::Report> {
    let headers = credentials(&name, &password);
    let response = run_async(world.api.create_task(&headers, &task_body(&title)));
    if !response.status.is_success() {
        return Err(eyre::eyre!("creating task for {name} failed: {response:?}"));
    }
    Ok(())
}
