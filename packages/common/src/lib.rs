//! # Blockwright Common
//!
//! Shared data model for the blockwright crates: blocks, block-type
//! descriptors, id generation and content payload decoding.

pub mod block;
pub mod content;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod value;

pub use block::{data_from, Block, BlockData, EditMode, EDIT_MODE_KEY};
pub use content::{parse_block_array, parse_content, PARAGRAPH_TYPE};
pub use descriptor::{BlockTypeDescriptor, Catalog, ContentSource};
pub use error::*;
pub use ids::{generate_block_id, generate_id};
pub use value::{field_is_truthy, is_truthy, merge_recursive, merge_shallow};
