//! The [`TaskListApi`] facade and its nine handlers.

use std::str::FromStr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::de::DeserializeOwned;

use super::dto::{
    CreateUserBody, MessageView, TaskBody, TaskView, UpdatePasswordBody, UserCreatedView, UserView,
};
use super::{ApiError, ApiResponse, RequestHeaders, Status};
use crate::identity::{
    adapters::{
        hashing::Argon2PasswordHasher,
        memory::{InMemoryAccountRemoval, InMemoryIdentityRepository},
        sqlite::{SqliteAccountRemoval, SqliteIdentityRepository},
    },
    domain::Username,
    ports::{AccountRemoval, IdentityRepository, PasswordHasher},
    services::{AccountService, IdentityVerifier, RegisterAccountRequest},
};
use crate::storage::{MemoryDatabase, SqlitePool};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, sqlite::SqliteTaskRepository},
    domain::TaskId,
    ports::TaskRepository,
    services::{TaskRequest, TaskService},
};

/// Handlers wired to the `SQLite` adapters.
pub type SqliteTaskListApi<H = Argon2PasswordHasher> = TaskListApi<
    SqliteIdentityRepository,
    H,
    SqliteAccountRemoval,
    SqliteTaskRepository,
    DefaultClock,
>;

/// Handlers wired to the in-memory adapters.
pub type InMemoryTaskListApi<H = Argon2PasswordHasher> = TaskListApi<
    InMemoryIdentityRepository,
    H,
    InMemoryAccountRemoval,
    InMemoryTaskRepository,
    DefaultClock,
>;

/// Request handlers for accounts and tasks.
///
/// Every authenticated handler verifies the `X-User`/`X-Password` pair
/// first and passes only the verified username on. Task ownership is never
/// read from a request body.
pub struct TaskListApi<R, H, A, T, C>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
    A: AccountRemoval,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    verifier: IdentityVerifier<R, H>,
    accounts: AccountService<R, H, A, C>,
    tasks: TaskService<T, C>,
}

impl<H> SqliteTaskListApi<H>
where
    H: PasswordHasher + 'static,
{
    /// Wires the handlers to a `SQLite` pool.
    ///
    /// The pool must already carry the schema; see [`crate::storage::open`].
    #[must_use]
    pub fn from_pool(pool: &SqlitePool, hasher: Arc<H>) -> Self {
        let identities = Arc::new(SqliteIdentityRepository::new(pool.clone()));
        let removal = Arc::new(SqliteAccountRemoval::new(pool.clone()));
        let tasks = Arc::new(SqliteTaskRepository::new(pool.clone()));
        Self::new(identities, hasher, removal, tasks, Arc::new(DefaultClock))
    }
}

impl<H> InMemoryTaskListApi<H>
where
    H: PasswordHasher + 'static,
{
    /// Wires the handlers to shared in-memory tables.
    #[must_use]
    pub fn in_memory(database: &MemoryDatabase, hasher: Arc<H>) -> Self {
        let identities = Arc::new(InMemoryIdentityRepository::new(database.clone()));
        let removal = Arc::new(InMemoryAccountRemoval::new(database.clone()));
        let tasks = Arc::new(InMemoryTaskRepository::new(database.clone()));
        Self::new(identities, hasher, removal, tasks, Arc::new(DefaultClock))
    }
}

impl<R, H, A, T, C> TaskListApi<R, H, A, T, C>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
    A: AccountRemoval,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wires the handlers from individual ports.
    #[must_use]
    pub fn new(
        identities: Arc<R>,
        hasher: Arc<H>,
        removal: Arc<A>,
        tasks: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            verifier: IdentityVerifier::new(Arc::clone(&identities), Arc::clone(&hasher)),
            accounts: AccountService::new(identities, hasher, removal, Arc::clone(&clock)),
            tasks: TaskService::new(tasks, clock),
        }
    }

    /// `GET /users`: lists every account. Needs no credentials.
    pub async fn list_users(&self) -> ApiResponse {
        respond(async {
            let accounts = self.accounts.list_accounts().await?;
            let views: Vec<UserView> = accounts.iter().map(UserView::from).collect();
            ApiResponse::json(Status::Ok, &views)
        })
        .await
    }

    /// `POST /users`: registers an account from `{username, password}`.
    pub async fn create_user(&self, body: &str) -> ApiResponse {
        respond(async {
            let input: CreateUserBody = parse_body(body)?;
            let summary = self
                .accounts
                .register(RegisterAccountRequest::new(input.username, input.password))
                .await?;
            let view = UserCreatedView {
                message: "user created",
                username: summary.username().clone(),
            };
            ApiResponse::json(Status::Created, &view)
        })
        .await
    }

    /// `GET /users/me`: returns the caller's account.
    pub async fn get_me(&self, headers: &RequestHeaders) -> ApiResponse {
        respond(async {
            let username = self.authenticate(headers).await?;
            let summary = self.accounts.profile(&username).await?;
            ApiResponse::json(Status::Ok, &UserView::from(&summary))
        })
        .await
    }

    /// `PUT /users/me`: replaces the caller's password from `{password}`.
    pub async fn update_me(&self, headers: &RequestHeaders, body: &str) -> ApiResponse {
        respond(async {
            let username = self.authenticate(headers).await?;
            let input: UpdatePasswordBody = parse_body(body)?;
            self.accounts
                .change_password(&username, input.password)
                .await?;
            ApiResponse::json(
                Status::Ok,
                &MessageView {
                    message: "password updated",
                },
            )
        })
        .await
    }

    /// `DELETE /users/me`: removes the caller and all of the caller's tasks.
    pub async fn delete_me(&self, headers: &RequestHeaders) -> ApiResponse {
        respond(async {
            let username = self.authenticate(headers).await?;
            self.accounts.delete_account(&username).await?;
            Ok(ApiResponse::no_content())
        })
        .await
    }

    /// `GET /todos`: lists the caller's tasks.
    pub async fn list_tasks(&self, headers: &RequestHeaders) -> ApiResponse {
        respond(async {
            let owner = self.authenticate(headers).await?;
            let tasks = self.tasks.list(&owner).await?;
            let views: Vec<TaskView> = tasks.iter().map(TaskView::from).collect();
            ApiResponse::json(Status::Ok, &views)
        })
        .await
    }

    /// `POST /todos`: creates a task owned by the caller.
    pub async fn create_task(&self, headers: &RequestHeaders, body: &str) -> ApiResponse {
        respond(async {
            let owner = self.authenticate(headers).await?;
            let request = task_request(parse_body(body)?);
            let task = self.tasks.create(&owner, request).await?;
            ApiResponse::json(Status::Created, &TaskView::from(&task))
        })
        .await
    }

    /// `PUT /todos/{id}`: replaces title and completion of a caller's task.
    pub async fn update_task(&self, headers: &RequestHeaders, id: &str, body: &str) -> ApiResponse {
        respond(async {
            let task_id = TaskId::from_str(id)?;
            let owner = self.authenticate(headers).await?;
            let request = task_request(parse_body(body)?);
            let task = self.tasks.update(&owner, task_id, request).await?;
            ApiResponse::json(Status::Ok, &TaskView::from(&task))
        })
        .await
    }

    /// `DELETE /todos/{id}`: deletes a caller's task.
    pub async fn delete_task(&self, headers: &RequestHeaders, id: &str) -> ApiResponse {
        respond(async {
            let task_id = TaskId::from_str(id)?;
            let owner = self.authenticate(headers).await?;
            self.tasks.delete(&owner, task_id).await?;
            Ok(ApiResponse::no_content())
        })
        .await
    }

    async fn authenticate(&self, headers: &RequestHeaders) -> Result<Username, ApiError> {
        let claimed = headers.claimed_credentials();
        Ok(self.verifier.verify_request(&claimed).await?)
    }
}

async fn respond(
    handler: impl Future<Output = Result<ApiResponse, ApiError>>,
) -> ApiResponse {
    handler.await.unwrap_or_else(ApiError::into_response)
}

fn parse_body<B: DeserializeOwned>(body: &str) -> Result<B, ApiError> {
    Ok(serde_json::from_str(body)?)
}

fn task_request(body: TaskBody) -> TaskRequest {
    TaskRequest::new(body.title).with_completed(body.completed)
}
