//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecclesia_core::config::Config;
use ecclesia_db::DbPool;
use std::path::{Path, PathBuf};

pub mod cell;
pub mod dashboard;
pub mod event;
pub mod finance;
pub mod init;
pub mod member;
pub mod records;
pub mod serve;

/// Ecclesia - Church Management
#[derive(Parser)]
#[command(name = "ecclesia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the project state directory, config and database
    Init(init::InitArgs),

    /// Start the web server
    Serve(serve::ServeArgs),

    /// Show the headline numbers
    Dashboard(dashboard::DashboardArgs),

    /// Manage members
    #[command(subcommand)]
    Member(member::MemberCommands),

    /// Manage cells (small groups)
    #[command(subcommand)]
    Cell(cell::CellCommands),

    /// Manage tithes, offerings and other entries
    #[command(subcommand)]
    Finance(finance::FinanceCommands),

    /// Manage events
    #[command(subcommand)]
    Event(event::EventCommands),
}

impl Cli {
    /// The `--project` directory, or the current one.
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine the current directory"),
        }
    }

    pub async fn execute(self, project_dir: &Path) -> Result<()> {
        match self.command {
            Commands::Init(args) => init::execute(args, project_dir).await,
            Commands::Serve(args) => serve::execute(args, project_dir).await,
            Commands::Dashboard(args) => dashboard::execute(args, project_dir).await,
            Commands::Member(cmd) => member::execute(cmd, project_dir).await,
            Commands::Cell(cmd) => cell::execute(cmd, project_dir).await,
            Commands::Finance(cmd) => finance::execute(cmd, project_dir).await,
            Commands::Event(cmd) => event::execute(cmd, project_dir).await,
        }
    }
}

/// Load the project config and open its database.
pub fn open_store(project_dir: &Path) -> Result<(Config, DbPool)> {
    let config = Config::load(project_dir)?;
    let db_path = config.db_path(project_dir);
    let pool = ecclesia_db::init_pool(&db_path)
        .with_context(|| format!("cannot open database {}", db_path.display()))?;
    Ok((config, pool))
}
