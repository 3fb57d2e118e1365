//! `habit-streaks` binary: resolves the habits file, configures logging on
//! stderr and serves MCP over stdin/stdout until the client disconnects.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use habit_streaks::HabitTrackerServer;

const DATA_FILE_NAME: &str = "habits.json";

/// First writable location for the habits file
///
/// Tries `~/.habit_streaks`, the platform data and config directories and
/// the working directory, then falls back to the system temp directory.
fn default_data_path() -> std::io::Result<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|dir| dir.join(".habit_streaks")),
        dirs::data_dir().map(|dir| dir.join("habit_streaks")),
        dirs::config_dir().map(|dir| dir.join("habit_streaks")),
        std::env::current_dir().ok().map(|dir| dir.join(".habit_streaks")),
    ];

    if let Some(dir) = candidates.into_iter().flatten().find(|dir| is_writable_dir(dir)) {
        return Ok(dir.join(DATA_FILE_NAME));
    }

    let dir = std::env::temp_dir().join("habit_streaks");
    std::fs::create_dir_all(&dir)?;
    warn!("No writable data directory found, using {}", dir.display());
    Ok(dir.join(DATA_FILE_NAME))
}

fn is_writable_dir(dir: &Path) -> bool {
    let marker = dir.join(".write_check");
    let writable = std::fs::create_dir_all(dir).is_ok() && std::fs::write(&marker, b"").is_ok();
    let _ = std::fs::remove_file(marker);
    writable
}

/// Command line arguments for the Habit Streaks MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON habits file (defaults to ~/.habit_streaks/habits.json)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_streaks={}", log_level))
        .with_writer(std::io::stderr) // stdout carries JSON-RPC
        .init();

    info!("Starting Habit Streaks MCP server");

    let data_path = match args.data_file {
        Some(path) => path,
        None => default_data_path()?,
    };

    info!("Using habits file at: {}", data_path.display());

    let server = HabitTrackerServer::new(data_path).await?;

    server.run().await?;

    info!("Habit Streaks MCP server shutdown complete");
    Ok(())
}
