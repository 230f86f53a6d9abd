pub mod applications;
pub mod dashboard;
pub mod render;

use std::path::PathBuf;

use anyhow::Result;
use applications::{process_add_command, process_list_command, process_remove_command, AddCommand};
use clap::{Parser, Subcommand};
use dashboard::{process_heatmap_command, process_stats_command, HeatmapCommand, StatsCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    store::{entities::RecordId, snapshot_storage::FileSnapshotStorage},
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, create_application_path},
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Appstreak", version, long_about = None)]
#[command(about = "Application for tracking job applications and daily streaks", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Record a new application")]
    Add {
        #[command(flatten)]
        command: AddCommand,
    },
    #[command(about = "List all applications, newest first")]
    List {},
    #[command(about = "Delete an application by its id")]
    Remove {
        #[arg(help = "Id shown by the list command")]
        id: i64,
    },
    #[command(about = "Display total, today's applications and the current streak")]
    Stats {
        #[command(flatten)]
        command: StatsCommand,
    },
    #[command(about = "Display applications per day for the last days")]
    Heatmap {
        #[command(flatten)]
        command: HeatmapCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, create_application_path)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&app_dir, logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let storage = FileSnapshotStorage::new(app_dir)?;
    let clock = DefaultClock;

    match args.commands {
        Commands::Add { command } => process_add_command(command, &storage, &clock).await,
        Commands::List {} => process_list_command(&storage).await,
        Commands::Remove { id } => process_remove_command(RecordId(id), &storage).await,
        Commands::Stats { command } => process_stats_command(command, &storage, &clock).await,
        Commands::Heatmap { command } => process_heatmap_command(command, &storage, &clock).await,
    }
}
