//! Command-line front end for the task list handlers.
//!
//! Each invocation opens the configured `SQLite` database, runs one handler,
//! and prints the JSON response body to stdout. The exit status is zero for
//! 2xx responses and non-zero otherwise.
//!
//! ```text
//! tasklist --user alice --password pw1 register
//! tasklist --user alice --password pw1 tasks add "buy milk"
//! tasklist --user alice --password pw1 tasks update 1 "buy oat milk" --completed
//! tasklist users
//! ```
//!
//! Credentials may also come from `TASKLIST_USER` and `TASKLIST_PASSWORD`,
//! and the config path from `TASKLIST_CONFIG`.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tasklist::api::{ApiResponse, RequestHeaders, SqliteTaskListApi, Status};
use tasklist::config::{ConfigError, ServiceConfig};
use tasklist::identity::adapters::hashing::Argon2PasswordHasher;
use tasklist::identity::ports::HashingError;
use tasklist::storage::{self, StorageError};
use tasklist::telemetry::{self, TelemetryError};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "TASKLIST_CONFIG", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database path, overriding the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<String>,

    /// Username sent as `X-User`
    #[arg(long, env = "TASKLIST_USER", global = true)]
    user: Option<String>,

    /// Password sent as `X-Password`
    #[arg(long, env = "TASKLIST_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the schema and exit
    Init,
    /// List registered accounts
    Users,
    /// Register the account named by --user and --password
    Register,
    /// Show the authenticated account
    Whoami,
    /// Change the authenticated account's password
    Passwd {
        /// New password
        new_password: String,
    },
    /// Delete the authenticated account and all of its tasks
    DeleteAccount,
    /// Manage the authenticated account's tasks
    #[command(subcommand)]
    Tasks(TaskCommand),
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks
    List,
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Mark the task as completed
        #[arg(long)]
        completed: bool,
    },
    /// Replace a task's title and completion flag
    Update {
        /// Task id
        id: String,
        /// New title
        title: String,
        /// Mark the task as completed
        #[arg(long)]
        completed: bool,
    },
    /// Remove a task
    Remove {
        /// Task id
        id: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(status) if status.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            // The subscriber may not be installed yet, so report directly.
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "tasklist: {err}").ok();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Status, CliError> {
    let mut config = ServiceConfig::load(cli.config.as_deref())?
        .with_env_overrides(|key| std::env::var(key).ok());
    if let Some(url) = cli.database {
        config.database.url = url;
    }
    telemetry::init(&config.logging.filter)?;

    let pool = storage::open(&config.database)?;
    let hasher = Arc::new(Argon2PasswordHasher::from_config(&config.hashing)?);
    let api = SqliteTaskListApi::from_pool(&pool, hasher);

    let headers = credentials(cli.user.as_deref(), cli.password.as_deref());
    let response = match cli.command {
        Command::Init => ApiResponse {
            status: Status::Ok,
            body: Some(json!({ "message": "schema ready" })),
        },
        Command::Users => api.list_users().await,
        Command::Register => {
            let body = json!({
                "username": cli.user.unwrap_or_default(),
                "password": cli.password.unwrap_or_default(),
            });
            api.create_user(&body.to_string()).await
        }
        Command::Whoami => api.get_me(&headers).await,
        Command::Passwd { new_password } => {
            let body = json!({ "password": new_password });
            api.update_me(&headers, &body.to_string()).await
        }
        Command::DeleteAccount => api.delete_me(&headers).await,
        Command::Tasks(task) => run_task_command(&api, &headers, task).await,
    };

    print_response(&response)?;
    Ok(response.status)
}

async fn run_task_command(
    api: &SqliteTaskListApi,
    headers: &RequestHeaders,
    command: TaskCommand,
) -> ApiResponse {
    match command {
        TaskCommand::List => api.list_tasks(headers).await,
        TaskCommand::Add { title, completed } => {
            let body = json!({ "title": title, "completed": completed });
            api.create_task(headers, &body.to_string()).await
        }
        TaskCommand::Update {
            id,
            title,
            completed,
        } => {
            let body = json!({ "title": title, "completed": completed });
            api.update_task(headers, &id, &body.to_string()).await
        }
        TaskCommand::Remove { id } => api.delete_task(headers, &id).await,
    }
}

fn credentials(user: Option<&str>, password: Option<&str>) -> RequestHeaders {
    let mut headers = RequestHeaders::new();
    if let Some(name) = user {
        headers.insert(tasklist::api::USER_HEADER, name);
    }
    if let Some(secret) = password {
        headers.insert(tasklist::api::PASSWORD_HEADER, secret);
    }
    headers
}

fn print_response(response: &ApiResponse) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match &response.body {
        Some(body) => {
            let rendered = serde_json::to_string_pretty(body)?;
            writeln!(stdout, "{rendered}")?;
        }
        None => writeln!(stdout, "{}", response.status.code())?,
    }
    Ok(())
}
