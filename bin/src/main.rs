//! sangkat CLI - property price estimates for Phnom Penh.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use sangkat_lib::{DEFAULT_RECENT_LIMIT, RecordId};
use std::path::PathBuf;

mod commands;
mod display;

use commands::estimate::EstimateArgs;

#[derive(Parser)]
#[command(name = "sangkat")]
#[command(about = "Property price estimates for Phnom Penh districts and communes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing district.json and commune.json. Defaults to the bundled data.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory containing the price model files
    #[arg(long, global = true, default_value = "model")]
    model_dir: PathBuf,

    /// Search history database. Defaults to the user data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a property price (prompts for anything not given)
    Estimate(EstimateArgs),

    /// List districts
    Districts,

    /// List the communes of a district
    Communes {
        /// District name or slug (e.g. "Daun Penh", daun-penh)
        district: String,
    },

    /// Show recent searches
    History {
        /// Number of searches to show
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Show a past search
    Show {
        /// Search ID from the history list
        id: RecordId,
    },
}

fn init_logging(verbose: u8) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let data_dir = cli.data_dir.as_deref();
    let db = cli.db.as_deref();

    match command {
        Commands::Estimate(args) => {
            commands::estimate::estimate(&args, data_dir, &cli.model_dir, db)
        }
        Commands::Districts => commands::districts::list_districts(data_dir),
        Commands::Communes { district } => commands::communes::list_communes(&district, data_dir),
        Commands::History { limit } => commands::history::history(limit, db),
        Commands::Show { id } => commands::show::show(id, db),
    }
}
