//! Command-line interface for gridlock.

use clap::Parser;
use std::path::PathBuf;

/// Gridlock - real-time 5x5 four-in-a-row matchmaking server
#[derive(Parser, Debug)]
#[command(name = "gridlock")]
#[command(about = "Pairs players over WebSocket and referees their games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./gridlock.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory of static assets to serve next to the game endpoint
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}
