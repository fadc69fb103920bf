//! NotesFlow CLI - browse and edit notes from the terminal
//!
//! Talks to the notes API and falls back to the local cache when the server
//! cannot be reached.

mod cli;
mod commands;
mod error;
mod notifier;


use clap::Parser;
use notesflow_core::NoteStore;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::open_store;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::pin::run_pin;
use crate::commands::search::run_search;
use crate::error::CliError;

const DEFAULT_LIST_LIMIT: usize = 10;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notesflow=info")),
        )
        .init();

    let cli = Cli::parse();

    // Completions never touch the network or the cache
    if let Some(Commands::Completions { shell, output }) = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let store = open_store(&cli.connection).await?;
    run_store_command(&store, cli.command).await
}

async fn run_store_command(store: &NoteStore, command: Option<Commands>) -> Result<(), CliError> {
    match command {
        Some(Commands::List { query, limit, json }) => {
            run_list(store, query.as_deref(), limit, json)?;
        }
        Some(Commands::Search { query, json }) => run_search(store, &query, json)?,
        Some(Commands::Add {
            title,
            color,
            content,
        }) => {
            run_add(store, title.as_deref(), color.map(Into::into), &content).await?;
        }
        Some(Commands::Edit {
            id,
            title,
            content,
            color,
        }) => {
            run_edit(store, &id, title, content, color.map(Into::into)).await?;
        }
        Some(Commands::Delete { id }) => run_delete(store, &id).await?,
        Some(Commands::Pin { id }) => run_pin(store, &id).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => run_list(store, None, DEFAULT_LIST_LIMIT, false)?,
    }

    Ok(())
}
