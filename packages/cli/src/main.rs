mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, catalog, import, render, ApplyArgs, CatalogArgs, ImportArgs, RenderArgs};

/// Blockwright CLI - render, import and edit block content
#[derive(Parser, Debug)]
#[command(name = "blockwright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log strategy decisions (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render stored block content to HTML
    Render(RenderArgs),

    /// Convert Markdown to blocks
    Import(ImportArgs),

    /// Apply a list of mutations to stored content
    Apply(ApplyArgs),

    /// List the block catalog
    Catalog(CatalogArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Render(args) => render(args, &cwd),
                Command::Import(args) => import(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::Catalog(args) => catalog(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
