//! wardctl CLI - Hospital ward records from the command line
//!
//! This is the main entry point for the wardctl command-line tool, which provides:
//! - Room management (`room` subcommand)
//! - Patient registration, admission and discharge (`patient` subcommand)
//! - Doctor appointments (`doctor` subcommand)
//! - Nurse tasks and shifts (`nurse`, `task` subcommands)
//! - Configuration (`config` subcommand)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, info_span};
use wardctl_core::db::schema;
use wardctl_core::{Database, WardConfig};

mod commands;
mod config;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "wardctl",
    author,
    version,
    about = "Hospital ward records: rooms, patients, doctors and nurses in one SQLite file",
    long_about = "Keep track of rooms, inpatients and outpatients, appointments, nursing tasks \
                  and shifts. Every change is written to a local SQLite database; multi-row \
                  changes such as admission and discharge are applied atomically."
)]
struct Cli {
    /// Database file (overrides config and WARDCTL_DB)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Config file (default: ~/.wardctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging on the console
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress status lines (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and all tables
    Init,
    /// Manage ward rooms
    Room(commands::room::RoomArgs),
    /// Manage patients
    Patient(commands::patient::PatientArgs),
    /// Manage doctors and their appointments
    Doctor(commands::doctor::DoctorArgs),
    /// Manage nurses, ward tasks and shifts
    Nurse(commands::nurse::NurseArgs),
    /// Inspect the ward task queue
    Task(commands::task::TaskArgs),
    /// Manage wardctl configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn load_config(explicit: Option<&Path>, db_override: Option<&Path>) -> Result<WardConfig> {
    let mut config = match explicit {
        Some(path) => WardConfig::load_from(path),
        None => WardConfig::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(db) = db_override {
        config.database.path = db.to_path_buf();
    }
    Ok(config)
}

/// Open the configured database, creating any missing table. Every
/// database event is recorded under a span naming the subcommand.
fn open_database(config: &WardConfig, command: &'static str) -> Database {
    let span = info_span!("wardctl", command, db = %config.database.path.display());
    let db = Database::from_config(&config.database).with_span(span);
    schema::initialize(&db);
    db
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize UI quiet mode from flag and env var
    ui::init_quiet_mode(cli.quiet);

    let config = load_config(cli.config.as_deref(), cli.db.as_deref())?;
    tracing_setup::init(&tracing_setup::TracingConfig::from_logging(&config.logging, cli.debug)).ok();

    match cli.command {
        Commands::Init => run_init(&config)?,
        Commands::Room(args) => commands::run_room(args, &open_database(&config, "room"))?,
        Commands::Patient(args) => commands::run_patient(args, &open_database(&config, "patient"))?,
        Commands::Doctor(args) => commands::run_doctor(args, &open_database(&config, "doctor"))?,
        Commands::Nurse(args) => commands::run_nurse(args, &open_database(&config, "nurse"))?,
        Commands::Task(args) => commands::run_task(args, &open_database(&config, "task"))?,
        Commands::Config(args) => config::run_config(args, cli.config.as_deref(), &config)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_init(config: &WardConfig) -> Result<()> {
    let db = open_database(config, "init");
    info!(path = %db.path().display(), "database initialized");

    ui::success(format!("Database ready at {}", db.path().display()));
    if !ui::is_quiet() {
        for table in schema::table_names() {
            println!("  - {table}");
        }
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
