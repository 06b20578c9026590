//! Grievance CLI - Command-line interface for the grievance portal
//!
//! This CLI gives citizens and authorities a terminal interface to:
//! - File grievances through the category / guidelines / details wizard
//! - List and inspect grievances with their status history
//! - Move grievances through their lifecycle and triage them
//! - View citizen and authority dashboards
//!
//! Records are kept in a JSON file (`--store`, or `store.path` in config).

use clap::{Parser, Subcommand};
use grievance_engine::{FixedPriority, GrievanceDesk};
use grievance_types::{Category, GrievanceStatus, Priority};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod store;

use commands::{intake, lifecycle, records, Desk, ScopeArgs};
pub use config::{LoggingConfig, PortalConfig, StoreConfig, TriageConfig};
pub use error::{CliError, CliResult};
pub use store::FileGrievanceStore;

/// Grievance CLI application
#[derive(Parser)]
#[command(name = "grievance")]
#[command(about = "Grievance portal - file, track and resolve civic grievances", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GRIEVANCE_CONFIG")]
    config: Option<String>,

    /// Record store file (overrides store.path)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// List grievance categories and the filing guidelines
    Categories,

    /// File a new grievance
    File {
        /// Citizen filing the grievance
        #[arg(long)]
        citizen: String,

        /// Category, by name or label ("Water Supply")
        #[arg(long)]
        category: Option<Category>,

        /// Acknowledge the filing guidelines
        #[arg(long)]
        acknowledge: bool,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Reference to a photo or document (URL or upload id); repeatable
        #[arg(long = "evidence")]
        evidence: Vec<String>,
    },

    /// List grievances
    List {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show a grievance with its status history
    Show {
        /// Grievance ID
        id: String,
    },

    /// Show dashboard counts
    Dashboard {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Move a grievance to a new status
    Transition {
        /// Grievance ID
        id: String,

        /// Target status (e.g. "Action Taken", Resolved)
        status: GrievanceStatus,

        /// Officer making the change
        #[arg(long)]
        actor: String,

        /// Note kept on the history entry
        #[arg(long)]
        note: Option<String>,

        /// Reference to a site photo or document; repeatable
        #[arg(long = "evidence")]
        evidence: Vec<String>,
    },

    /// Mark a grievance as read
    MarkRead {
        /// Grievance ID
        id: String,
    },

    /// Set a grievance's priority
    Prioritize {
        /// Grievance ID
        id: String,

        /// Low, Medium or High
        priority: Priority,

        #[arg(long)]
        actor: String,
    },
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let mut config = PortalConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.store {
        config.store.path = path;
    }

    init_tracing(&config.logging, cli.verbose);

    let desk: Desk = GrievanceDesk::new(
        FileGrievanceStore::open(&config.store.path),
        FixedPriority(config.triage.default_priority),
    );
    tracing::debug!(store = %config.store.path.display(), "Opened grievance store");

    let format = cli.output;
    match cli.command {
        Commands::Categories => intake::categories(format),
        Commands::File {
            citizen,
            category,
            acknowledge,
            subject,
            description,
            location,
            evidence,
        } => intake::file(
            &desk,
            intake::FileArgs {
                citizen,
                category,
                acknowledge,
                subject,
                description,
                location,
                evidence,
            },
            format,
        ),
        Commands::List { scope } => records::list(&desk, &scope, format),
        Commands::Show { id } => records::show(&desk, &id, format),
        Commands::Dashboard { scope } => records::dashboard(&desk, &scope, format),
        Commands::Transition {
            id,
            status,
            actor,
            note,
            evidence,
        } => lifecycle::transition(&desk, &id, status, &actor, note, evidence, format),
        Commands::MarkRead { id } => lifecycle::mark_read(&desk, &id, format),
        Commands::Prioritize {
            id,
            priority,
            actor,
        } => lifecycle::prioritize(&desk, &id, priority, &actor, format),
    }
}

/// Logs go to stderr so structured output on stdout stays parseable
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    if let Err(err) = result {
        eprintln!("tracing already initialised: {err}");
    }
}
