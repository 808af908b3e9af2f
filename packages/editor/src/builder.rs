//! # Content Builder
//!
//! Live editing state for one content field: the block document plus the
//! transient UI state around it (insertion picker, media picker, Markdown
//! import dialog, block search).
//!
//! Actions never fail. Anything that does not apply (unknown block id,
//! unknown type, move past either end) leaves the state untouched and is
//! logged at `debug`.

use std::sync::Arc;

use blockwright_common::{Block, BlockData, BlockTypeDescriptor, Catalog};
use blockwright_engine::{BlockRegistry, FaqDirectory, FaqSummary, MarkdownImporter};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::document::ContentDocument;
use crate::mutations::{CollectionAction, Direction, Mutation, MutationOutcome, RowAction};
use crate::EditorError;

/// Group used for block types without a category label
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// Block types grouped by category label
pub type CategorizedBlocks = IndexMap<String, Catalog>;

pub struct ContentBuilder {
    registry: Arc<BlockRegistry>,
    faqs: Option<Arc<dyn FaqDirectory>>,
    document: ContentDocument,

    /// Where the next picked block goes
    active_insertion_index: Option<usize>,
    block_search: String,

    /// Which field the media picker fills
    media_picker_context: Option<String>,

    markdown_import_open: bool,
    markdown_input: String,
}

impl ContentBuilder {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            registry,
            faqs: None,
            document: ContentDocument::new(),
            active_insertion_index: None,
            block_search: String::new(),
            media_picker_context: None,
            markdown_import_open: false,
            markdown_input: String::new(),
        }
    }

    pub fn with_faq_directory(mut self, faqs: Arc<dyn FaqDirectory>) -> Self {
        self.faqs = Some(faqs);
        self
    }

    /// Replace the document with stored field content
    pub fn mount(&mut self, input: Option<&str>) {
        self.document = ContentDocument::mount(input);
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    pub fn blocks(&self) -> &[Block] {
        self.document.blocks()
    }

    /// Apply a mutation against the current catalog
    pub fn apply(&mut self, mutation: &Mutation) -> MutationOutcome {
        let outcome = self
            .document
            .apply(mutation, self.registry.available_blocks());
        match &outcome {
            MutationOutcome::Applied => {
                debug!(mutation = ?mutation, version = self.document.version, "Mutation applied")
            }
            MutationOutcome::Noop { reason } => {
                debug!(mutation = ?mutation, reason = %reason, "Mutation ignored")
            }
        }
        outcome
    }

    // ========================================================================
    // Block actions
    // ========================================================================

    /// Add a block; without an index it goes where the picker was opened, or last
    pub fn add_block(&mut self, block_type: &str, index: Option<usize>, data: BlockData) {
        let mutation = Mutation::AddBlock {
            block_type: block_type.to_string(),
            index: index.or(self.active_insertion_index),
            data,
        };
        if self.apply(&mutation).is_applied() {
            self.active_insertion_index = None;
        }
    }

    pub fn remove_block(&mut self, id: &str) {
        self.apply(&Mutation::RemoveBlock { id: id.to_string() });
    }

    pub fn move_block(&mut self, id: &str, direction: Direction) {
        self.apply(&Mutation::MoveBlock {
            id: id.to_string(),
            direction,
        });
    }

    pub fn update_block_data_property(&mut self, id: &str, property: &str, value: Value) {
        self.apply(&Mutation::UpdateProperty {
            id: id.to_string(),
            property: property.to_string(),
            value,
        });
    }

    pub fn update_block_data(&mut self, id: &str, data: BlockData) {
        self.apply(&Mutation::UpdateData {
            id: id.to_string(),
            data,
        });
    }

    pub fn transform_block(&mut self, id: &str, block_type: &str) {
        self.apply(&Mutation::TransformBlock {
            id: id.to_string(),
            block_type: block_type.to_string(),
        });
    }

    pub fn toggle_edit_mode(&mut self, id: &str) {
        self.apply(&Mutation::ToggleEditMode { id: id.to_string() });
    }

    pub fn update_block_data_rows(&mut self, id: &str, action: RowAction) {
        self.apply(&Mutation::UpdateRows {
            id: id.to_string(),
            action,
        });
    }

    pub fn update_block_data_collection(
        &mut self,
        id: &str,
        property: &str,
        action: CollectionAction,
        index: Option<usize>,
    ) {
        self.apply(&Mutation::UpdateCollection {
            id: id.to_string(),
            property: property.to_string(),
            action,
            index,
        });
    }

    // ========================================================================
    // Pickers
    // ========================================================================

    pub fn open_picker(&mut self, index: usize) {
        self.active_insertion_index = Some(index);
    }

    pub fn close_picker(&mut self) {
        self.active_insertion_index = None;
        self.block_search.clear();
    }

    pub fn active_insertion_index(&self) -> Option<usize> {
        self.active_insertion_index
    }

    pub fn set_block_search(&mut self, search: impl Into<String>) {
        self.block_search = search.into();
    }

    pub fn block_search(&self) -> &str {
        &self.block_search
    }

    pub fn open_media_picker(&mut self, context: impl Into<String>) {
        self.media_picker_context = Some(context.into());
    }

    pub fn close_media_picker(&mut self) {
        self.media_picker_context = None;
    }

    /// The chosen media is written by the caller through a data update
    pub fn on_media_selected(&mut self) {
        self.media_picker_context = None;
    }

    pub fn media_picker_context(&self) -> Option<&str> {
        self.media_picker_context.as_deref()
    }

    // ========================================================================
    // Markdown import
    // ========================================================================

    pub fn open_markdown_import(&mut self) {
        self.markdown_import_open = true;
    }

    pub fn close_markdown_import(&mut self) {
        self.markdown_import_open = false;
        self.markdown_input.clear();
    }

    pub fn is_markdown_import_open(&self) -> bool {
        self.markdown_import_open
    }

    pub fn set_markdown_input(&mut self, markdown: impl Into<String>) {
        self.markdown_input = markdown.into();
    }

    pub fn markdown_input(&self) -> &str {
        &self.markdown_input
    }

    /// Append blocks converted from the dialog input, then close the dialog
    pub fn import_markdown(&mut self, importer: &MarkdownImporter) {
        let blocks = importer.convert_to_blocks(&self.markdown_input);
        if !blocks.is_empty() {
            info!(blocks = blocks.len(), "Appending imported blocks");
            self.document.append(blocks);
        }
        self.close_markdown_import();
    }

    // ========================================================================
    // Read models
    // ========================================================================

    pub fn available_blocks(&self) -> &Catalog {
        self.registry.available_blocks()
    }

    /// Catalog grouped by category label, filtered by the block search
    pub fn categorized_blocks(&self) -> CategorizedBlocks {
        let search = self.block_search.to_lowercase();
        let mut groups = CategorizedBlocks::new();

        for (code, descriptor) in self.available_blocks() {
            if !search.is_empty() && !matches_search(code, descriptor, &search) {
                continue;
            }
            let group = descriptor
                .category_label
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
            groups
                .entry(group)
                .or_default()
                .insert(code.clone(), descriptor.clone());
        }

        groups
    }

    /// FAQs selectable in a `faq_block`; empty without a directory
    pub fn available_faqs(&self) -> Vec<FaqSummary> {
        self.faqs
            .as_ref()
            .map(|faqs| faqs.find_all())
            .unwrap_or_default()
    }

    /// The block sequence in its stored JSON form
    pub fn blocks_json(&self) -> Result<String, EditorError> {
        self.document.to_json()
    }
}

fn matches_search(code: &str, descriptor: &BlockTypeDescriptor, search: &str) -> bool {
    let label = descriptor.label.as_deref().unwrap_or_default().to_lowercase();
    label.contains(search) || code.to_lowercase().contains(search)
}
