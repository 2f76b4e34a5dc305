#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Mahjong Solitaire engine headlessly.

mod autoplay;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mahjong_solitaire_core::LayoutId;
use tracing_subscriber::EnvFilter;

use crate::config::load_config;

#[derive(Debug, Parser)]
#[command(name = "mahjong-solitaire")]
#[command(about = "Deal and autoplay Mahjong Solitaire boards")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// List the built-in layouts
    Layouts,
    /// Deal a board and play it by following hints
    Play {
        /// Layout to deal onto
        #[arg(long, default_value = "turtle")]
        layout: LayoutId,

        /// Seed for the deal and every shuffle
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// TOML file with generation tuning and autoplay limits
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides the shuffle budget from the config file
        #[arg(long)]
        max_shuffles: Option<u32>,
    },
}

/// Entry point for the Mahjong Solitaire command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        CliCommand::Layouts => {
            for layout in mahjong_solitaire_layouts::catalog() {
                println!(
                    "{:<10} {:<10} {:>4} tiles  {}",
                    layout.id().as_str(),
                    layout.name(),
                    layout.tile_count(),
                    layout.description()
                );
            }
        }
        CliCommand::Play {
            layout,
            seed,
            config,
            max_shuffles,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(max_shuffles) = max_shuffles {
                config.max_shuffles = max_shuffles;
            }
            let summary = autoplay::play(layout, seed, &config);
            println!("{summary}");
        }
    }

    Ok(())
}
