//! padbridge-replay - feed captured controller traffic through the adapter
//! and inspect what it would send to the controller and to the host.

#![deny(static_mut_refs)]

mod capture;
mod decode;
mod replay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::capture::{CaptureFile, Direction, parse_hex_bytes};

#[derive(Parser)]
#[command(name = "padbridge-replay")]
#[command(about = "Replay and decode Wii Remote / Switch Pro bridge traffic")]
#[command(version)]
struct Cli {
    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON capture file through a controller adapter
    Replay {
        /// Capture file with a registration and a list of frames
        capture: PathBuf,
        /// Print the replay summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a single raw report
    Decode {
        /// Which side sent the report
        #[arg(long, value_enum)]
        from: Direction,
        /// Report bytes, e.g. `0x20 0x00 0x00 0x02 0x00 0x00 0xC8`
        #[arg(required = true, num_args = 1..)]
        data: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Replay { capture, json } => {
            let file = CaptureFile::load(&capture)?;
            let summary = replay::replay(&file)
                .with_context(|| format!("Replay of '{}' failed", capture.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                replay::print_human(&summary);
            }
        }
        Commands::Decode { from, data } => {
            let bytes = parse_hex_bytes(&data.join(" ")).map_err(anyhow::Error::msg)?;
            let value = decode::decode(from, &bytes)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
