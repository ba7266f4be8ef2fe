//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use evalbox_core::api::ApiClient;
use evalbox_core::config::{self, paths};
use evalbox_core::logging;
use evalbox_core::state::PersistedState;
use evalbox_core::storage::{FileStorage, MemoryStorage, SharedStorage};
use tokio::runtime::Runtime;

use crate::modes;

mod commands;

#[derive(Parser)]
#[command(name = "evalbox")]
#[command(version)]
#[command(about = "Terminal client for a remote command evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the evaluation server (overrides config and EVALBOX_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Keep command text, history and theme in memory only
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Evaluates a command and prints the response
    Eval {
        /// The command text (whitespace is stripped before sending)
        #[arg(value_name = "COMMAND")]
        command: String,
    },

    /// Manage evaluation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Show or toggle the display theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Sends a request to the server and prints the response body
    Request {
        /// HTTP method: GET, POST, PUT or DELETE
        #[arg(value_name = "METHOD")]
        method: String,

        /// Path relative to the base URL
        #[arg(value_name = "PATH")]
        path: String,

        /// Query parameter (repeatable; repeated keys become a list)
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,

        /// Request body as JSON text
        #[arg(short, long, value_name = "JSON")]
        body: Option<String>,

        /// Send the body verbatim instead of as JSON (POST only)
        #[arg(long)]
        raw: bool,
    },

    /// Uploads a file as multipart form data
    Upload {
        /// File to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path relative to the base URL
        #[arg(long, value_name = "PATH", default_value = "/upload")]
        to: String,

        /// Query parameter (repeatable; repeated keys become a list)
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,

        /// MIME type of the file part
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum HistoryCommands {
    /// Lists history entries
    List,
    /// Shows one entry in full
    Show {
        /// Entry number as shown by `history list`
        #[arg(value_name = "INDEX")]
        index: usize,
    },
    /// Deletes one entry
    Delete {
        /// Entry number as shown by `history list`
        #[arg(value_name = "INDEX")]
        index: usize,
    },
    /// Deletes every entry
    Clear,
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Prints the current theme
    Show,
    /// Switches between light and dark
    Toggle,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let _log_guard = match logging::init(&paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let config = config::Config::load().context("load config")?;

    let Cli {
        command,
        base_url,
        ephemeral,
    } = cli;

    let storage = open_storage(ephemeral);
    let client = || {
        let base_url = base_url
            .clone()
            .unwrap_or_else(|| config.effective_base_url());
        ApiClient::new(&base_url)
    };

    // default to the interactive editor
    let Some(command) = command else {
        let persisted = PersistedState::load(storage);
        return modes::run_interactive(&config, persisted, client()?).await;
    };

    match command {
        Commands::Eval { command } => {
            let mut persisted = PersistedState::load(storage);
            commands::eval::run(&client()?, &config, &mut persisted, &command).await
        }

        Commands::History { command } => {
            let mut persisted = PersistedState::load(storage);
            match command {
                HistoryCommands::List => {
                    commands::history::list(&persisted);
                    Ok(())
                }
                HistoryCommands::Show { index } => commands::history::show(&persisted, index),
                HistoryCommands::Delete { index } => {
                    commands::history::delete(&mut persisted, index)
                }
                HistoryCommands::Clear => {
                    commands::history::clear(&mut persisted);
                    Ok(())
                }
            }
        }

        Commands::Theme { command } => {
            let mut persisted = PersistedState::load(storage);
            match command {
                ThemeCommands::Show => commands::theme::show(&persisted),
                ThemeCommands::Toggle => commands::theme::toggle(&mut persisted),
            }
            Ok(())
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },

        Commands::Request {
            method,
            path,
            query,
            body,
            raw,
        } => {
            commands::request::run(
                &client()?,
                commands::request::RequestOptions {
                    method: &method,
                    path: &path,
                    query: &query,
                    body: body.as_deref(),
                    raw,
                },
            )
            .await
        }

        Commands::Upload {
            file,
            to,
            query,
            mime,
        } => commands::upload::run(&client()?, &file, &to, &query, mime).await,
    }
}

fn open_storage(ephemeral: bool) -> SharedStorage {
    if ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        let storage = FileStorage::open(paths::state_path());
        tracing::debug!(path = %storage.path().display(), "opened state file");
        Arc::new(storage)
    }
}
