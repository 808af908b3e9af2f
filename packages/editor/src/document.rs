//! # Content Document
//!
//! The ordered block sequence being edited, plus a version counter.
//!
//! ## Lifecycle
//!
//! ```text
//! Mount → Mutate → Serialize
//!   ↓        ↓         ↓
//! JSON    blocks     JSON
//! ```
//!
//! Mounting accepts anything the form field may hold: a JSON block array,
//! legacy HTML (kept as one paragraph), or nothing at all.

use std::path::Path;

use blockwright_common::{parse_content, Block, Catalog};
use tracing::debug;

use crate::mutations::{Mutation, MutationOutcome};
use crate::EditorError;

/// Editable block sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDocument {
    blocks: Vec<Block>,

    /// Current version number (increments on each applied mutation)
    pub version: u64,
}

impl ContentDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks, version: 0 }
    }

    /// Build a document from stored field content
    pub fn mount(input: Option<&str>) -> Self {
        let blocks = parse_content(input);
        debug!(blocks = blocks.len(), "Mounted content");
        Self::from_blocks(blocks)
    }

    /// Load stored content from a file
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Ok(Self::mount(Some(&source)))
    }

    /// Write the serialized block array to a file
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| EditorError::io(path, e))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.has_id(id))
    }

    /// Apply a mutation; the version moves only when something changed
    pub fn apply(&mut self, mutation: &Mutation, catalog: &Catalog) -> MutationOutcome {
        let outcome = mutation.apply(&mut self.blocks, catalog);
        if outcome.is_applied() {
            self.version += 1;
        }
        outcome
    }

    /// Append blocks at the end (Markdown import)
    pub fn append(&mut self, blocks: Vec<Block>) {
        if blocks.is_empty() {
            return;
        }
        self.blocks.extend(blocks);
        self.version += 1;
    }

    /// Serialize to the stored JSON array form
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(&self.blocks)?)
    }
}
