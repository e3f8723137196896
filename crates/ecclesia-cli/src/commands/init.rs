//! Project initialization command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ecclesia_core::config::Config;
use std::path::Path;

#[derive(Args)]
pub struct InitArgs {
    /// Email of the user the web pages are opened for
    #[arg(long)]
    pub user: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InitArgs, project_dir: &Path) -> Result<()> {
    let config_path = Config::config_path(project_dir);
    let mut config = Config::load(project_dir)?;

    if config_path.exists() && !args.force {
        println!(
            "{} Config already exists: {} {}",
            "→".blue().bold(),
            config_path.display(),
            "(use --force to rewrite)".dimmed()
        );
    } else {
        if args.user.is_some() {
            config.user = args.user;
        }
        config.save(project_dir)?;
        println!("{} Wrote {}", "✓".green().bold(), config_path.display());
    }

    let db_path = config.db_path(project_dir);
    ecclesia_db::init_pool(&db_path)?;
    println!("{} Database ready: {}", "✓".green().bold(), db_path.display());

    println!();
    println!("{}", "Next steps:".bold());
    println!("  ecclesia member add \"<name>\"   # Register your first member");
    println!("  ecclesia serve                 # Start the web dashboard");

    Ok(())
}
