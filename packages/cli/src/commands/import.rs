use crate::config::Config;
use anyhow::{anyhow, Result};
use blockwright_common::Block;
use blockwright_engine::{MarkdownImporter, StrategyChain};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{read_file, resolve, write_output};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Markdown file, or a directory of .md files
    pub input: PathBuf,

    /// Write the block JSON to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let services = config.services(cwd)?;
    let importer = MarkdownImporter::with_commonmark(Arc::new(StrategyChain::builtin(&services)));

    let input = resolve(cwd, &args.input);
    let files = if input.is_file() {
        vec![input]
    } else if input.is_dir() {
        find_md_files(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let mut blocks: Vec<Block> = Vec::new();
    for file in &files {
        let markdown = read_file(file)?;
        let imported = importer.convert_to_blocks(&markdown);
        eprintln!(
            "  {} {} → {} blocks",
            "✓".green(),
            file.display(),
            imported.len()
        );
        blocks.extend(imported);
    }

    let json = serde_json::to_string_pretty(&blocks)?;
    let out = args.out.map(|path| resolve(cwd, &path));
    write_output(out.as_deref(), &json)
}

/// Markdown files under `dir`, in path order
fn find_md_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("md"))
        .collect()
}
