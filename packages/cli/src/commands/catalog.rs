use crate::config::Config;
use anyhow::{anyhow, Result};
use blockwright_common::Catalog;
use blockwright_editor::ContentBuilder;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Only list block types whose label or code contains this term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Validate that every block type has exactly one content source
    #[arg(long)]
    pub check: bool,
}

pub fn catalog(args: CatalogArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut builder = ContentBuilder::new(config.registry(cwd)?);
    if let Some(search) = args.search {
        builder.set_block_search(search);
    }

    let groups = builder.categorized_blocks();
    if groups.is_empty() {
        println!("{}", "⚠️  No block types found".yellow());
    }

    for (label, blocks) in &groups {
        println!("{}", label.bright_blue().bold());
        for (code, descriptor) in blocks {
            let name = descriptor.label.as_deref().unwrap_or(code.as_str());
            println!("  {} {}", code.green(), name.dimmed());
        }
    }

    if args.check {
        let problems = check_content_sources(builder.available_blocks());
        println!();
        if problems.is_empty() {
            println!("{} All block types have a content source", "✅".green());
        } else {
            for (code, problem) in &problems {
                eprintln!("  {} {} - {}", "✗".red(), code, problem.red());
            }
            return Err(anyhow!("{} block types failed validation", problems.len()));
        }
    }

    Ok(())
}

/// Block codes whose descriptor has no or two content sources
fn check_content_sources(catalog: &Catalog) -> Vec<(String, String)> {
    catalog
        .iter()
        .filter_map(|(code, descriptor)| {
            descriptor
                .validate_content_source()
                .err()
                .map(|e| (code.clone(), e.to_string()))
        })
        .collect()
}
