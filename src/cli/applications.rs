use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

use crate::{
    activity::ActivityAggregator,
    store::{
        entities::{NewApplication, RecordId},
        snapshot_storage::FileSnapshotStorage,
        EventStore, LoadIssue, SaveStatus,
    },
    utils::clock::{today, Clock},
};

use super::{render, Args};

#[derive(Debug, Parser)]
pub struct AddCommand {
    #[arg(help = "Link to the job posting")]
    pub url: String,
    #[arg(
        long,
        short,
        help = "Company name. When omitted it is guessed from the url, https://jobs.careers.acme.com/x becomes Acme"
    )]
    pub company: Option<String>,
    #[arg(long, short, help = "Position applied for. Defaults to \"Software Engineer Intern\"")]
    pub position: Option<String>,
}

/// Command to process `add` command. The snapshot stays locked from loading until the new
/// application is written.
pub async fn process_add_command(
    AddCommand {
        url,
        company,
        position,
    }: AddCommand,
    storage: &FileSnapshotStorage,
    clock: &dyn Clock,
) -> Result<()> {
    let application = NewApplication {
        url,
        company,
        position,
    };

    let lock = storage.lock_exclusive().await?;
    let mut store = EventStore::load(storage).await;
    warn_if_load_issue(store.load_issue());
    let submitted = store.submit(application, clock).await;
    lock.release().await?;

    let (record, status) = submitted.map_err(|e| {
        Args::command().error(clap::error::ErrorKind::ValueValidation, e.to_string())
    })?;

    let streak = ActivityAggregator::new(store.records(), today(clock)).current_streak();
    println!("Added application");
    println!("{}", render::record_row(&record));
    println!("{}", render::streak_line(streak));
    warn_if_unsaved(status);
    Ok(())
}

pub async fn process_list_command(storage: &FileSnapshotStorage) -> Result<()> {
    let store = EventStore::load(storage).await;
    warn_if_load_issue(store.load_issue());
    print!("{}", render::record_table(store.records()));
    Ok(())
}

/// Command to process `remove` command. Removing an id that doesn't exist isn't an error.
pub async fn process_remove_command(id: RecordId, storage: &FileSnapshotStorage) -> Result<()> {
    let lock = storage.lock_exclusive().await?;
    let mut store = EventStore::load(storage).await;
    warn_if_load_issue(store.load_issue());
    let removed = store.remove_by_id(id).await;
    lock.release().await?;

    match removed {
        Some((record, status)) => {
            println!("Removed application");
            println!("{}", render::record_row(&record));
            warn_if_unsaved(status);
        }
        None => {
            info!("Nothing to remove for {id}");
            println!("No application with id {id}");
        }
    }
    Ok(())
}

pub(super) fn warn_if_load_issue(issue: Option<LoadIssue>) {
    if let Some(issue) = issue {
        eprintln!(
            "{}",
            ansi_term::Colour::Yellow.paint(render::load_issue_warning(issue))
        );
    }
}

fn warn_if_unsaved(status: SaveStatus) {
    if status == SaveStatus::Unsaved {
        eprintln!(
            "{}",
            ansi_term::Colour::Yellow
                .paint("Warning: failed to save applications, this change will be lost once appstreak exits")
        );
    }
}
