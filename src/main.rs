//! `annolay` CLI - convert, inspect, and simulate legacy video annotations

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cmd;

#[derive(Parser)]
#[command(name = "annolay")]
#[command(about = "Codec and visibility engine for legacy time-coded video annotations")]
#[command(version)]
struct Cli {
    /// Enable debug logging (shows dropped-annotation reasons)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy annotation XML to AR text
    Convert {
        /// Input XML file, or '-' for stdin
        input: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit canonical JSON instead of AR text
        #[arg(short, long)]
        json: bool,

        /// Trusted origin prefix for action links
        #[arg(long, default_value = annolay::DEFAULT_TRUSTED_PREFIX)]
        origin: String,
    },

    /// Pretty-print an AR text file
    Dump {
        /// Input AR file, or '-' for stdin
        input: PathBuf,

        /// Emit canonical JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Evaluate visibility transitions at one or more playback positions
    Track {
        /// Input AR file, or '-' for stdin
        input: PathBuf,

        /// Playback positions, as seconds ("90") or colon durations ("1:02:03")
        #[arg(long = "at", required = true)]
        at: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Convert { input, output, json, origin } => {
            cmd::convert::cmd_convert(&input, output.as_deref(), json, &origin)
        }
        Commands::Dump { input, json } => cmd::dump::cmd_dump(&input, json),
        Commands::Track { input, at } => cmd::track::cmd_track(&input, &at),
    }
}
