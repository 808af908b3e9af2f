//! # Blockwright Editor
//!
//! Live editing of a block sequence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ engine: catalog, strategies, importer       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: document + mutations                │
//! │  - Mount stored content (JSON or legacy)    │
//! │  - Apply structural and data mutations      │
//! │  - Builder UI state (pickers, import)       │
//! │  - Pipeline: mutate → preview render        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine: renderer, blocks → HTML             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Blocks are source of truth**: HTML is a derived view
//! 2. **Ids are the only handle**: mutations locate blocks by id
//! 3. **No failing edits**: inapplicable mutations are no-ops
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockwright_editor::{ContentBuilder, Direction};
//!
//! let mut builder = ContentBuilder::new(registry);
//! builder.mount(Some(stored_json));
//! builder.add_block("paragraph", None, Default::default());
//! builder.move_block(&id, Direction::Up);
//! let json = builder.blocks_json()?;
//! ```

mod builder;
mod document;
mod errors;
mod mutations;
mod pipeline;

pub use builder::{CategorizedBlocks, ContentBuilder, UNCATEGORIZED_LABEL};
pub use document::ContentDocument;
pub use errors::EditorError;
pub use mutations::{CollectionAction, Direction, Mutation, MutationOutcome, RowAction};
pub use pipeline::{Pipeline, PipelineResult};
