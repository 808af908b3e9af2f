pub mod apply;
pub mod catalog;
pub mod import;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use catalog::{catalog, CatalogArgs};
pub use import::{import, ImportArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Resolve a command-line path against the working directory
fn resolve(cwd: &str, path: &Path) -> std::path::PathBuf {
    Path::new(cwd).join(path)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}

/// Write to `out` when given, else print to stdout
fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!("  {} {}", "✓".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
