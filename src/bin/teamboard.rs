//! Command-line front-end for the team task board.
//!
//! Usage:
//!
//! ```text
//! teamboard [--config <path>] <command>
//! ```
//!
//! Commands: `tasks`, `board`, `move <task-id> <status>`, `stats`,
//! `members`, and `add-member`. The backend URL, keys, and credentials come
//! from the layered configuration; for example:
//!
//! ```text
//! TEAMBOARD_BACKEND__URL=https://project.supabase.co \
//! TEAMBOARD_BACKEND__ANON_KEY=... \
//! TEAMBOARD_AUTH__EMAIL=lead@example.com \
//! TEAMBOARD_AUTH__PASSWORD=... \
//! teamboard move 6f1c1d2e-8d7a-4b7e-9f59-1f9e1c0f4a11 done
//! ```

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use teamboard::{
    backend::{BackendClient, BackendError},
    board::{
        domain::{DragController, DragError},
        services::{BoardError, KanbanBoard, StatusChangeOutcome},
    },
    config::{ConfigError, TeamboardConfig},
    failure::FailureKind,
    profile::{
        adapters::rest::{RestAuthGateway, RestProfileDirectory},
        domain::{UserId, UserSession, UserType},
        ports::{AuthError, AuthGateway},
        services::{AddMemberRequest, SessionError, SessionService, TeamAdminError, TeamAdministrationService},
    },
    task::{
        adapters::{
            notifying::{NoopNotifier, NotifyingTaskGateway},
            rest::{RestTaskGateway, WebhookNotifier},
        },
        domain::{Task, TaskFilter, TaskId, TaskPriority, TaskStatus},
        ports::{NotifierError, TaskGatewayError, TaskNotifier},
        services::{DashboardService, TaskCatalogError, TaskCatalogService, TaskQuery},
    },
    telemetry,
};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Gateway = NotifyingTaskGateway<RestTaskGateway, dyn TaskNotifier>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
    #[error("no credentials configured; set auth.access_token or auth.email and auth.password")]
    MissingCredentials,
    #[error("the stored session has expired; sign in again")]
    SessionExpired,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Catalog(#[from] TaskCatalogError),
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Drag(#[from] DragError),
    #[error(transparent)]
    TeamAdmin(#[from] TeamAdminError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    const fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Backend(err) => Some(err.kind()),
            Self::Auth(err) => Some(err.kind()),
            Self::Session(err) => Some(err.kind()),
            Self::Catalog(err) => Some(err.kind()),
            Self::Gateway(err) => Some(err.kind()),
            Self::Board(err) => Some(err.kind()),
            Self::TeamAdmin(err) => Some(err.kind()),
            Self::MissingCredentials | Self::SessionExpired => Some(FailureKind::NetworkOrAuth),
            Self::Drag(_) => Some(FailureKind::Validation),
            Self::Config(_) | Self::Notifier(_) | Self::RuntimeInit(_) | Self::Output(_) => None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "teamboard", version, about = "Team task board client")]
struct Cli {
    /// Configuration file used instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks, ordered by due date.
    Tasks {
        /// Only tasks with this status.
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Only tasks with this priority.
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        /// Only tasks assigned to this user.
        #[arg(long, conflicts_with = "mine")]
        assignee: Option<UserId>,
        /// Only tasks assigned to the signed-in user.
        #[arg(long)]
        mine: bool,
        /// Case-insensitive text to find in title or description.
        #[arg(long)]
        search: Option<String>,
        /// Maximum number of tasks to print.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the kanban board, one column per status.
    Board,
    /// Move a task to another column.
    Move {
        /// Task identifier.
        task: TaskId,
        /// Target status.
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Print dashboard statistics and team workload.
    Stats,
    /// List team members (team leaders only).
    Members,
    /// Add a team member (team leaders only).
    AddMember {
        /// Email address of the new member.
        #[arg(long)]
        email: String,
        /// Display name.
        #[arg(long)]
        full_name: String,
        /// Free-text role such as Frontend or QA.
        #[arg(long)]
        role: String,
        /// Grant team leader rights.
        #[arg(long)]
        leader: bool,
    },
}

fn parse_status(raw: &str) -> Result<TaskStatus, BoxError> {
    TaskStatus::try_from(raw).map_err(Into::into)
}

fn parse_priority(raw: &str) -> Result<TaskPriority, BoxError> {
    TaskPriority::try_from(raw).map_err(Into::into)
}

/// Backend adapters bound to one signed-in session.
struct Context {
    session: UserSession,
    gateway: Arc<Gateway>,
    directory: Arc<RestProfileDirectory>,
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    runtime.block_on(run(cli)).map_err(|err| {
        if let Some(kind) = err.kind() {
            error!(failure = %kind, surface = ?kind.surface(), "command failed");
        }
        BoxError::from(err)
    })
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match cli.config.as_deref() {
        Some(path) => TeamboardConfig::load_from(path)?,
        None => TeamboardConfig::load()?,
    };
    if !telemetry::init(&config.log.filter) {
        tracing::debug!("tracing subscriber already installed");
    }
    let context = connect(&config).await?;
    let mut out = io::stdout().lock();
    execute(cli.command, &context, &mut out).await
}

async fn connect(config: &TeamboardConfig) -> Result<Context, CliError> {
    let client = BackendClient::new(config.backend.require()?)?;
    let auth = Arc::new(RestAuthGateway::new(client.clone()));
    let access_token = match config.auth.access_token() {
        Some(token) => token.to_owned(),
        None => {
            let (email, password) = config
                .auth
                .credentials()
                .ok_or(CliError::MissingCredentials)?;
            auth.sign_in(email, password).await?.access_token().to_owned()
        }
    };

    let bound = client.with_access_token(access_token.as_str());
    let directory = Arc::new(RestProfileDirectory::new(bound.clone()));
    let session = SessionService::new(auth, Arc::clone(&directory))
        .restore(&access_token)
        .await?
        .ok_or(CliError::SessionExpired)?;

    let notifier: Arc<dyn TaskNotifier> = match WebhookNotifier::from_config(&config.notifications)? {
        Some(webhook) => Arc::new(webhook),
        None => Arc::new(NoopNotifier),
    };
    let gateway = Arc::new(NotifyingTaskGateway::new(
        RestTaskGateway::new(bound),
        notifier,
    ));
    Ok(Context {
        session,
        gateway,
        directory,
    })
}

async fn execute(command: Command, context: &Context, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Tasks {
            status,
            priority,
            assignee,
            mine,
            search,
            limit,
        } => {
            let filter = TaskFilter {
                status,
                priority,
                assigned_to: if mine {
                    Some(context.session.user_id())
                } else {
                    assignee
                },
            };
            let mut query = TaskQuery::new().with_filter(filter);
            if let Some(needle) = search {
                query = query.with_search(needle);
            }
            if let Some(max) = limit {
                query = query.with_limit(max);
            }
            list_tasks(context, query, out).await
        }
        Command::Board => print_board(context, out).await,
        Command::Move { task, status } => move_task(context, task, status, out).await,
        Command::Stats => print_stats(context, out).await,
        Command::Members => print_members(context, out).await,
        Command::AddMember {
            email,
            full_name,
            role,
            leader,
        } => {
            let user_type = if leader {
                UserType::TeamLeader
            } else {
                UserType::TeamMember
            };
            let request = AddMemberRequest::new(email, full_name, role).with_user_type(user_type);
            add_member(context, request, out).await
        }
    }
}

async fn list_tasks(context: &Context, query: TaskQuery, out: &mut impl Write) -> Result<(), CliError> {
    let tasks = TaskCatalogService::new(Arc::clone(&context.gateway))
        .list(query)
        .await?;
    for task in &tasks {
        write_task(out, task)?;
    }
    Ok(())
}

async fn print_board(context: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let mut board = KanbanBoard::new(Arc::clone(&context.gateway));
    let grouping = board.load().await?;
    for status in TaskStatus::ALL {
        let column = grouping.column(status);
        writeln!(out, "== {status} ({}) ==", column.len())?;
        for task in column {
            write_task(out, task)?;
        }
    }
    Ok(())
}

/// Drives the same drag session a pointer gesture would, hovering straight
/// over the requested column.
async fn move_task(
    context: &Context,
    task: TaskId,
    status: TaskStatus,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut board = KanbanBoard::new(Arc::clone(&context.gateway));
    board.load().await?;
    let mut drag = DragController::new();
    drag.start(task, board.grouping())?;
    drag.hover_target(Some(status));
    match board.handle_drop(drag.drop()).await? {
        StatusChangeOutcome::Moved(moved) => {
            writeln!(out, "moved '{}' to {}", moved.title(), moved.status())?;
        }
        StatusChangeOutcome::Unchanged => {
            writeln!(out, "task {task} is already in {status}")?;
        }
    }
    Ok(())
}

async fn print_stats(context: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let dashboard = DashboardService::new(Arc::clone(&context.gateway), Arc::new(DefaultClock))
        .load(&context.session)
        .await?;
    let stats = dashboard.statistics;
    writeln!(
        out,
        "total {} | done {} | in progress {} | to do {} | urgent {} | overdue {}",
        stats.total, stats.completed, stats.in_progress, stats.todo, stats.urgent, stats.overdue
    )?;
    writeln!(out, "workload:")?;
    for entry in &dashboard.workload {
        writeln!(
            out,
            "  {}: {} to do, {} in progress, {} done",
            entry.assignee.full_name, entry.todo, entry.in_progress, entry.done
        )?;
    }
    writeln!(out, "my tasks: {}", dashboard.my_tasks.len())?;
    writeln!(out, "recent:")?;
    for task in &dashboard.recent {
        write_task(out, task)?;
    }
    Ok(())
}

async fn print_members(context: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let members = TeamAdministrationService::new(Arc::clone(&context.directory))
        .members(&context.session)
        .await?;
    for member in &members {
        writeln!(
            out,
            "{}  {} ({}, {})",
            member.id(),
            member.full_name(),
            member.role(),
            member.user_type()
        )?;
    }
    Ok(())
}

async fn add_member(
    context: &Context,
    request: AddMemberRequest,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let added = TeamAdministrationService::new(Arc::clone(&context.directory))
        .add_member(&context.session, request)
        .await?;
    writeln!(
        out,
        "added {} ({}); temporary password: {}",
        added.profile.full_name(),
        added.profile.id(),
        added.temporary_password
    )?;
    Ok(())
}

fn write_task(out: &mut impl Write, task: &Task) -> io::Result<()> {
    let due = task
        .due_date()
        .map_or_else(|| "-".to_owned(), |date| date.format("%Y-%m-%d").to_string());
    let assignee = task
        .assignee()
        .map_or("unassigned", |summary| summary.full_name.as_str());
    writeln!(
        out,
        "{}  [{}] [{}] {}  due {}  -> {}",
        task.id(),
        task.status(),
        task.priority(),
        task.title(),
        due,
        assignee
    )
}
