mod commands;
mod follow;
mod logging;

use std::time::Duration;

use clap::{Parser, Subcommand};
use noxmap_core::AppConfigExt;
use noxmap_types::AppConfig;

#[derive(Parser)]
#[command(version, about = "Live EverQuest zone map follower")]
struct Cli {
    /// EverQuest directory, overriding the saved setting for this run
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[arg(long, global = true)]
    map_dir: Option<String>,

    /// Zone name to map code table (.json or .ini)
    #[arg(long, global = true)]
    lookup: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the newest log and track position, zone and corpse (default)
    Follow {
        /// Seconds between status lines
        #[arg(short, long, default_value_t = 1)]
        status_secs: u64,
    },
    /// Load a zone's map and print a summary
    LoadZone { name: String },
    /// List eqlog files, newest first
    Logs,
    /// List map files no zone refers to
    PruneMaps {
        #[arg(long)]
        delete: bool,
    },
    Config,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.log_dir {
            config.log_directory = dir.clone();
        }
        if let Some(dir) = &self.map_dir {
            config.map_directory = dir.clone();
        }
        if let Some(path) = &self.lookup {
            config.zone_lookup_path = path.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::load();

    match &cli.command {
        Some(Commands::SetDirectory { path }) => commands::set_directory(path, &mut config),
        Some(Commands::Config) => {
            cli.apply_overrides(&mut config);
            commands::show_settings(&config)
        }
        Some(Commands::Logs) => {
            cli.apply_overrides(&mut config);
            commands::list_files(&config)
        }
        Some(Commands::LoadZone { name }) => {
            cli.apply_overrides(&mut config);
            commands::load_zone(name, &config)
        }
        Some(Commands::PruneMaps { delete }) => {
            cli.apply_overrides(&mut config);
            commands::prune_maps(*delete, &config)
        }
        Some(Commands::Follow { status_secs }) => {
            cli.apply_overrides(&mut config);
            follow::run(&config, Duration::from_secs((*status_secs).max(1))).await
        }
        None => {
            cli.apply_overrides(&mut config);
            follow::run(&config, Duration::from_secs(1)).await
        }
    }
}
