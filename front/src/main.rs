use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use evo_api::v1::{Credentials, TodoId};
use evo_front::{
    ui::{todo_input::update_patch, Sidebar},
    ActionOutcome, AuthGate, Dashboard, FileSession, HttpTodoClient, Route, SharedSession,
    DEFAULT_API_URL,
};
use tracing_subscriber::EnvFilter;

/// Evolution of Todo in the terminal.
#[derive(Debug, Parser)]
#[command(name = "evo", version)]
struct Cli {
    #[arg(long, env = "EVO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Where the session token is kept. Defaults to the user config directory.
    #[arg(long, env = "EVO_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session.
    Logout,
    /// Show the navigation panel.
    Whoami,
    /// Show the dashboard.
    List,
    /// Add a task.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
    },
    /// Change fields of a task.
    Edit {
        id: TodoId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task as complete.
    Done { id: TodoId },
    /// Mark a task as incomplete.
    Undo { id: TodoId },
    /// Delete a task.
    Rm { id: TodoId },
}

enum Action {
    List,
    Add {
        title: String,
        description: Option<String>,
        due: Option<String>,
    },
    Edit {
        id: TodoId,
        title: Option<String>,
        description: Option<String>,
        due: Option<String>,
    },
    Toggle(TodoId, bool),
    Delete(TodoId),
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let path = match cli.session_file {
        Some(path) => path,
        None => FileSession::default_path()?,
    };
    let session: SharedSession = Arc::new(FileSession::new(path));
    let client = HttpTodoClient::new(&cli.api_url, session.clone());
    let gate = AuthGate::new(session);

    let action = match cli.command {
        Command::Signup { email, password } => {
            let user = gate
                .sign_up(&client, &Credentials { email, password })
                .await?;
            println!("Registered {}. Sign in with `evo login`.", user.email);
            return Ok(());
        }
        Command::Login { email, password } => {
            let user = gate
                .sign_in(&client, &Credentials { email, password })
                .await?;
            println!("Welcome, {}", user.email);
            return Ok(());
        }
        Command::Logout => {
            gate.sign_out(&client).await;
            print!("{}", Sidebar::from_gate(&gate));
            return Ok(());
        }
        Command::Whoami => {
            print!("{}", Sidebar::from_gate(&gate));
            return Ok(());
        }
        Command::List => Action::List,
        Command::Add {
            title,
            description,
            due,
        } => Action::Add {
            title,
            description,
            due,
        },
        Command::Edit {
            id,
            title,
            description,
            due,
        } => Action::Edit {
            id,
            title,
            description,
            due,
        },
        Command::Done { id } => Action::Toggle(id, true),
        Command::Undo { id } => Action::Toggle(id, false),
        Command::Rm { id } => Action::Delete(id),
    };

    run_dashboard(Dashboard::new(client, gate), action).await
}

async fn run_dashboard(
    mut dashboard: Dashboard<HttpTodoClient>,
    action: Action,
) -> eyre::Result<()> {
    let mut outcome = dashboard.mount().await;

    if outcome.is_applied() {
        outcome = match action {
            Action::List => {
                dashboard.set_view_mode(true);
                ActionOutcome::Applied
            }
            Action::Add {
                title,
                description,
                due,
            } => {
                dashboard.show_add_form(true);

                let form = dashboard.form_mut();
                form.title = title;
                form.description = description.unwrap_or_default();
                form.due_date = due.unwrap_or_default();

                dashboard.submit_form().await?
            }
            Action::Edit {
                id,
                title,
                description,
                due,
            } => {
                let patch = update_patch(title.as_deref(), description.as_deref(), due.as_deref())?;

                if patch.is_empty() {
                    eyre::bail!("nothing to change, pass --title, --description or --due");
                }

                dashboard.update_todo(id, patch).await
            }
            Action::Toggle(id, completed) => dashboard.toggle_todo(id, completed).await,
            Action::Delete(id) => dashboard.delete_todo(id).await,
        };
    }

    if let Some(alert) = dashboard.take_alert() {
        eprintln!("{}", alert);
    }

    if dashboard.route() == Route::Dashboard {
        print!("{}", dashboard.view());
    }

    match outcome {
        ActionOutcome::Applied => Ok(()),
        ActionOutcome::Redirected => {
            eyre::bail!("redirected to {}, run `evo login` first", Route::SignIn.path())
        }
        ActionOutcome::Failed(err) => Err(err.into()),
    }
}
