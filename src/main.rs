mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classcal")]
#[command(about = "Turn a scraped class schedule into a recurring calendar with reminders")]
struct Cli {
    /// Show debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an .ics calendar from a scraped schedule snapshot
    Build {
        /// JSON snapshot with "class_with_days" and "class_with_location" lists
        snapshot: PathBuf,

        /// Name used for the default output file (<user>_schedule.ics)
        #[arg(short, long)]
        user: Option<String>,

        /// Where to write the calendar
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Semester config (defaults to ~/.config/classcal/semester.toml)
        #[arg(long)]
        semester: Option<PathBuf>,
    },
    /// Show the sections and events a snapshot would produce
    Preview {
        snapshot: PathBuf,

        #[arg(long)]
        semester: Option<PathBuf>,
    },
    /// Write a starter semester config
    Init {
        #[arg(long)]
        semester: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            snapshot,
            user,
            output,
            semester,
        } => commands::build::run(&snapshot, user.as_deref(), output, semester.as_deref()),
        Commands::Preview { snapshot, semester } => {
            commands::preview::run(&snapshot, semester.as_deref())
        }
        Commands::Init { semester, force } => commands::init::run(semester, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
