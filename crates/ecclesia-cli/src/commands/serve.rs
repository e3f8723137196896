//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ecclesia_core::config::STATE_DIR;
use ecclesia_core::session::{LocalSession, User};
use ecclesia_web::state::AppState;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::open_store;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to the config, then 3030)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to the config, then 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log (defaults to .ecclesia/serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn default_log_file(project_dir: &Path) -> PathBuf {
    project_dir.join(STATE_DIR).join("serve.log")
}

pub async fn execute(args: ServeArgs, project_dir: &Path) -> Result<()> {
    let (config, pool) = open_store(project_dir)?;
    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    let session = LocalSession::new(config.user.as_deref().map(User::new));
    let state = AppState::new(Arc::new(pool), Arc::new(session));

    println!();
    println!("  {} {}", "Ecclesia".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Dashboard".green(), host, port);
    println!("  {}        http://{}:{}/api", "API".green(), host, port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), host, port);
    match &config.user {
        Some(user) => println!("  {}       {}", "User".green(), user),
        None => println!(
            "  {}       {}",
            "User".yellow(),
            "none (set ECCLESIA_USER or `user` in config.toml)".dimmed()
        ),
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    ecclesia_web::run_server(state, &host, port).await
}
