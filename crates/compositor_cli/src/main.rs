// SPDX-License-Identifier: MIT OR Apache-2.0
//! `fxgraph` - validate and inspect compositor graph and preset files.

mod commands;

use clap::{Parser, Subcommand};
use compositor_graph::LibraryConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "fxgraph", version)]
struct Cli {
    /// Preset library configuration (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log mutations and file access
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check graph or preset files against every graph invariant.
    Validate {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print node and edge summaries.
    Info {
        /// Graph or preset file
        file: PathBuf,
    },
    /// Print nodes in execution order.
    Order {
        /// Graph or preset file
        file: PathBuf,
    },
    /// List a preset's exposed parameters.
    Params {
        /// Preset file, or a preset name from the search paths
        preset: String,
    },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("compositor_graph={level},fxgraph={level}")))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => LibraryConfig::load(path)?,
        None => LibraryConfig::default(),
    };

    let mut out = std::io::stdout().lock();
    match cli.cmd {
        Command::Validate { files } => {
            let failures = commands::validate(&files, &mut out)?;
            if failures > 0 {
                anyhow::bail!("{failures} of {} file(s) failed validation", files.len());
            }
            Ok(())
        }
        Command::Info { file } => commands::info(&file, &mut out),
        Command::Order { file } => commands::order(&file, &mut out),
        Command::Params { preset } => commands::params(&preset, &config, &mut out),
    }
}
