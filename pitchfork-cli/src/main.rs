//! Pitchfork project generator CLI

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

use commands::{
    resolve_base_dir, resume_on_startup, BaseDirCommand, ListCommand, NewArgs, NewCommand,
    QueryCommand, QueryId, ResumeCommand, UpdateCommand,
};
use pitchfork::{observability, SettingsStore, SourceGrouping};

#[derive(Parser)]
#[command(name = "pf")]
#[command(version)]
#[command(about = "Create C++ projects following the Pitchfork layout", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory new projects are created in
    #[arg(short = 'B', long, env = "PF_BASE_DIR", global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Change the directory new projects are created in
    BaseDir {
        /// New base directory (prompts when omitted)
        path: Option<PathBuf>,
    },
    /// Create a new project
    New(NewArgs),
    /// Finish setting up a newly created project
    Resume {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List projects in the base directory
    List,
    /// Update the source lists of an existing project
    Update {
        /// Directory inside the project
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Layout of the rewritten lists
        #[arg(short, long, value_enum, default_value_t)]
        grouping: SourceGrouping,
    },
    /// Query the project
    Query {
        /// Information to print
        #[arg(value_enum)]
        id: QueryId,
        /// Directory inside the project
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let config_dir = SettingsStore::default_config_dir();
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    if let Commands::Resume { path } = &cli.command {
        return ResumeCommand::new(path.clone()).execute(&config_dir);
    }

    let mut settings =
        SettingsStore::open(&config_dir, &cwd).context("Failed to load settings")?;
    resume_on_startup(&mut settings, &cwd);

    match cli.command {
        Commands::BaseDir { path } => {
            BaseDirCommand::new(path).execute(&mut settings)?;
        }
        Commands::New(args) => {
            if let Some(base_dir) = resolve_base_dir(cli.base_dir.as_deref(), &mut settings)? {
                NewCommand::new(base_dir, args.presets()).execute()?;
            } else {
                println!("{}", style("Project creation cancelled.").dim());
            }
        }
        Commands::List => {
            if let Some(base_dir) = resolve_base_dir(cli.base_dir.as_deref(), &mut settings)? {
                ListCommand::new(base_dir).execute()?;
            }
        }
        Commands::Update { path, grouping } => {
            UpdateCommand::new(path, grouping).execute()?;
        }
        Commands::Query { id, path } => {
            QueryCommand::new(id, path).execute()?;
        }
        Commands::Resume { .. } => {}
    }

    Ok(())
}
