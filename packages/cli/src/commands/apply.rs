use crate::config::Config;
use anyhow::{Context, Result};
use blockwright_editor::{ContentBuilder, Mutation, MutationOutcome, Pipeline};
use blockwright_engine::BlockRenderer;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::{read_file, resolve, write_output};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Stored content (JSON block array or legacy HTML)
    pub content: PathBuf,

    /// JSON array of mutations, applied in order
    pub mutations: PathBuf,

    /// Print the rendered preview instead of the block JSON
    #[arg(long)]
    pub html: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let services = config.services(cwd)?;

    let content = read_file(&resolve(cwd, &args.content))?;
    let mutations_path = resolve(cwd, &args.mutations);
    let mutations: Vec<Mutation> = serde_json::from_str(&read_file(&mutations_path)?)
        .with_context(|| format!("Invalid mutations in {}", mutations_path.display()))?;

    let mut builder = ContentBuilder::new(services.registry.clone());
    builder.mount(Some(&content));

    let mut pipeline = Pipeline::new(builder, Arc::new(BlockRenderer::builtin(&services)));
    let mut applied = 0;

    for mutation in &mutations {
        let result = pipeline.apply_mutation(mutation);
        match &result.outcome {
            MutationOutcome::Applied => {
                applied += 1;
                eprintln!("  {} {:?}", "✓".green(), mutation);
            }
            MutationOutcome::Noop { reason } => {
                eprintln!("  {} {:?} - {}", "⚠".yellow(), mutation, reason.dimmed());
            }
        }
    }

    eprintln!(
        "{} Applied {} of {} mutations",
        "✅".green(),
        applied,
        mutations.len()
    );

    let output = if args.html {
        match pipeline.last_html() {
            Some(html) => html.to_string(),
            None => pipeline.full_render(),
        }
    } else {
        pipeline.builder().blocks_json()?
    };

    let out = args.out.map(|path| resolve(cwd, &path));
    write_output(out.as_deref(), &output)
}
