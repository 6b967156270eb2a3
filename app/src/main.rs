//! Terminal front end for the todo synchronizer.
//!
//! Commands are read line by line from stdin and forwarded to the
//! synchronizer. Rendering is driven separately by the store's change
//! notifications, so the list is redrawn after every successful operation and
//! nothing is redrawn after a failed one.

mod command;
mod config;
mod view;

use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use command::Command;
use config::Config;
use todo_sync::{SyncError, TodoId, TodoStore, TodoSynchronizer};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("no row {0}")]
    NoRow(usize),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    setup_tracing(config.verbose);
    info!(base_url = %config.base_url, "starting todo-app");

    let sync = TodoSynchronizer::spawn(&config.sync_config());
    let renderer = tokio::spawn(render_on_change(sync.subscribe()));

    if let Err(e) = sync.load().await {
        eprintln!("error: {e}");
        println!("{}", view::render(&sync.snapshot()));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{}", command::HELP),
            Ok(Some(command)) => {
                if let Err(e) = execute(&sync, command).await {
                    eprintln!("error: {e}");
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    // Dropping the last handle stops the worker, which ends the renderer.
    drop(sync);
    let _ = renderer.await;
    Ok(())
}

async fn execute(sync: &TodoSynchronizer, command: Command) -> Result<(), AppError> {
    match command {
        Command::Add(title) => {
            sync.create(title).await?;
        }
        Command::Draft(text) => sync.set_draft(text).await?,
        Command::Submit => {
            sync.submit().await?;
        }
        Command::Toggle(row) => {
            sync.toggle(id_at(sync, row)?).await?;
        }
        Command::Done(row) => sync.set_completed(id_at(sync, row)?, true).await?,
        Command::Undo(row) => sync.set_completed(id_at(sync, row)?, false).await?,
        Command::Delete(row) => sync.remove(id_at(sync, row)?).await?,
        Command::Reload => {
            sync.load().await?;
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Id of the todo shown at 1-based `row`.
fn id_at(sync: &TodoSynchronizer, row: usize) -> Result<TodoId, AppError> {
    sync.snapshot()
        .todos()
        .get(row.wrapping_sub(1))
        .map(|todo| todo.id.clone())
        .ok_or(AppError::NoRow(row))
}

async fn render_on_change(mut updates: watch::Receiver<TodoStore>) {
    while updates.changed().await.is_ok() {
        let text = view::render(&updates.borrow_and_update());
        println!("{text}");
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("todo_sync=debug,todo_app=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
