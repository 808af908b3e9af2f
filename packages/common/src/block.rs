//! # Content Blocks
//!
//! A block is one content unit of a document: an id, a type code that points
//! into the block catalog, and a free-form data map whose shape depends on
//! the type. Nothing here validates that shape; strategies tolerate missing
//! or malformed fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Type-specific block fields (`content`, `url`, `rows`, `items`, ...)
pub type BlockData = Map<String, Value>;

/// Key holding the editor mode of a block
pub const EDIT_MODE_KEY: &str = "editMode";

/// One block in a content sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique within a document; the only lookup key for mutations
    #[serde(default)]
    pub id: String,

    /// Catalog code of the block type
    #[serde(rename = "type", default)]
    pub block_type: String,

    /// Type-specific data
    #[serde(default, deserialize_with = "lenient_data")]
    pub data: BlockData,
}

impl Block {
    /// Create a block without an id (ids are assigned on insertion)
    pub fn new(block_type: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: String::new(),
            block_type: block_type.into(),
            data,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// String field from the data map, if present and a string
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Current edit mode; missing or null reads as visual, any other value
    /// than `"visual"` as html
    pub fn edit_mode(&self) -> EditMode {
        match self.data.get(EDIT_MODE_KEY) {
            None | Some(Value::Null) => EditMode::Visual,
            Some(Value::String(mode)) if mode == EditMode::Visual.as_str() => EditMode::Visual,
            Some(_) => EditMode::Html,
        }
    }

    /// True when the block carries the given id (blocks without ids never match)
    pub fn has_id(&self, id: &str) -> bool {
        !self.id.is_empty() && self.id == id
    }
}

/// How a block is edited in the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Visual,
    Html,
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Visual => "visual",
            EditMode::Html => "html",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EditMode::Visual => EditMode::Html,
            EditMode::Html => EditMode::Visual,
        }
    }
}

impl From<EditMode> for Value {
    fn from(mode: EditMode) -> Self {
        Value::String(mode.as_str().to_string())
    }
}

/// Accept any JSON for `data`; anything but an object becomes an empty map
fn lenient_data<'de, D>(deserializer: D) -> Result<BlockData, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(BlockData::new()),
    }
}

/// Build a `BlockData` from a `json!` object literal.
///
/// Non-object values yield an empty map.
pub fn data_from(value: Value) -> BlockData {
    match value {
        Value::Object(map) => map,
        _ => BlockData::new(),
    }
}
