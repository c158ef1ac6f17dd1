//! Then steps for account lifecycle BDD scenarios.

use super::world::{AccountWorld, run_async};
use rstest_bdd_macros::then;
use tasklist::identity::domain::Username;
use tasklist::task::{adapters::memory::InMemoryTaskRepository, ports::TaskRepository};

#[then("the response status is {code:u16}")]
fn response_status_is(world: &AccountWorld, code: u16) -> Result<(), eyre::Report> {
    let response = world.last_response()?;
    if response.status.code() != code {
        return Err(eyre::eyre!("expected status {code}, got {response:?}"));
    }
    Ok(())
}

#[then(r#"the response message is "{message}""#)]
fn response_message_is(world: &AccountWorld, message: String) -> Result<(), eyre::Report> {
    let response = world.last_response()?;
    if response.message() != Some(message.as_str()) {
        return Err(eyre::eyre!("expected message '{message}', got {response:?}"));
    }
    Ok(())
}

#[then("the last two responses are identical")]
fn last_two_responses_identical(world: &AccountWorld) -> Result<(), eyre::Report> {
    match world.responses.as_slice() {
        [.., earlier, latest] if earlier == latest => Ok(()),
        [.., earlier, latest] => Err(eyre::eyre!(
            "responses differ: {earlier:?} versus {latest:?}"
        )),
        _ => Err(eyre::eyre!("fewer than two responses recorded")),
    }
}

#[then(r#"the store holds {count:usize} tasks for "{name}""#)]
fn store_holds_tasks(world: &AccountWorld, count: usize, name: String) -> Result<(), eyre::Report> {
    let owner = Username::new(&name).map_err(|err| eyre::eyre!("invalid username: {err}"))?;
    let repository = InMemoryTaskRepository::new(world.database.clone());
    let tasks = run_async(repository.list_tasks(&owner))
        .map_err(|err| eyre::eyre!("list_tasks failed: {err}"))?;
    if tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks for {name}, found {}",
            tasks.len()
        ));
    }
    Ok(())
}
