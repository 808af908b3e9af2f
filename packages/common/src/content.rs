//! # Content Payloads
//!
//! Decoding of stored content into a block sequence.
//!
//! Content is normally a JSON array of blocks. Older content was stored as
//! raw HTML; anything that does not parse as JSON is wrapped into a single
//! paragraph block so it stays editable.

use serde_json::Value;
use tracing::debug;

use crate::block::{Block, BlockData, EditMode, EDIT_MODE_KEY};
use crate::ids::{generate_id, LEGACY_ID_PREFIX};

/// Block type used for text content and legacy HTML
pub const PARAGRAPH_TYPE: &str = "paragraph";

/// Decode a stored content payload.
///
/// - `None` or `""` → no blocks
/// - JSON array → its object entries as blocks (other entries are skipped)
/// - any other valid JSON → no blocks
/// - invalid JSON → one legacy paragraph holding the input verbatim
pub fn parse_content(input: Option<&str>) -> Vec<Block> {
    let Some(input) = input else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(entries)) => blocks_from_values(entries),
        Ok(_) => Vec::new(),
        Err(err) => {
            if input.is_empty() {
                return Vec::new();
            }
            debug!(error = %err, "Content is not JSON, wrapping as legacy HTML");
            vec![legacy_paragraph(input)]
        }
    }
}

/// Decode a JSON array of blocks, or `None` when the payload is not one
pub fn parse_block_array(json: &str) -> Option<Vec<Block>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(entries)) => Some(blocks_from_values(entries)),
        _ => None,
    }
}

/// Convert decoded JSON entries into blocks, skipping non-object entries
pub fn blocks_from_values(entries: Vec<Value>) -> Vec<Block> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(_) => serde_json::from_value::<Block>(entry).ok(),
            other => {
                debug!(entry = %other, "Skipping non-object content entry");
                None
            }
        })
        .collect()
}

/// Paragraph block wrapping legacy HTML
pub fn legacy_paragraph(html: &str) -> Block {
    let mut data = BlockData::new();
    data.insert("content".to_string(), Value::String(html.to_string()));
    data.insert(EDIT_MODE_KEY.to_string(), EditMode::Visual.into());
    Block::new(PARAGRAPH_TYPE, data).with_id(generate_id(LEGACY_ID_PREFIX))
}
