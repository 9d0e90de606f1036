// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exercise CLI - normalize, paste into and render exercise documents

mod commands;

use clap::{Parser, Subcommand};
use commands::{normalize, paste, render, seed, NormalizeArgs, PasteArgs, RenderArgs, SeedArgs};
use exercise_core::EditorConfig;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "exercise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with [normalize], [import] and [render] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repair a document and print it
    Normalize(NormalizeArgs),

    /// Paste clipboard payloads into a document
    Paste(PasteArgs),

    /// Render a document as HTML or an outline
    Render(RenderArgs),

    /// Print the starter document
    Seed(SeedArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Normalize(args) => normalize(args, config),
        Command::Paste(args) => paste(args, config),
        Command::Render(args) => render(args, config),
        Command::Seed(args) => seed(args),
    });

    if let Err(err) = result {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)),
        None => Ok(EditorConfig::default()),
    }
}
