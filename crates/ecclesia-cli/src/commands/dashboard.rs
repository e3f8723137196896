//! Dashboard command.

use anyhow::Result;
use clap::Args;
use ecclesia_core::dashboard::load_stats;
use std::path::Path;

use super::open_store;
use crate::output;

#[derive(Args)]
pub struct DashboardArgs {
    /// Print the figures as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: DashboardArgs, project_dir: &Path) -> Result<()> {
    let (_, pool) = open_store(project_dir)?;
    let stats = load_stats(&pool).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        output::print_dashboard(&stats);
    }

    Ok(())
}
