use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod display;
mod repl;

#[derive(Parser)]
#[command(name = "infinity-recipe")]
#[command(about = "Infinity Recipe - keep adding ingredients while the dish still makes sense", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/.config/infinity-recipe/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ingredient whitelist: a local file or an http(s) URL
    #[arg(long)]
    whitelist: Option<String>,

    /// Seed for base selection, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Model used by the judge
    #[arg(long)]
    model: Option<String>,
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the game prompt
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let app = app::App::bootstrap(&cli).await?;
    repl::run(app).await
}
