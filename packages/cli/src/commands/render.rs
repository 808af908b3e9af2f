use crate::config::Config;
use anyhow::Result;
use blockwright_engine::BlockRenderer;
use clap::Args;
use std::path::PathBuf;

use super::{read_file, resolve, write_output};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Stored content: a JSON array of blocks
    pub input: PathBuf,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let renderer = BlockRenderer::builtin(&config.services(cwd)?);

    let content = read_file(&resolve(cwd, &args.input))?;
    let html = renderer.render_json(&content);

    let out = args.out.map(|path| resolve(cwd, &path));
    write_output(out.as_deref(), &html)
}
