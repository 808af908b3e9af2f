//! Block id generation.
//!
//! Ids are opaque strings of the form `<prefix>_<uuid>`; the prefix only
//! hints at where a block came from.

use uuid::Uuid;

/// Prefix for blocks created by the builder or the importer
pub const BLOCK_ID_PREFIX: &str = "block";

/// Prefix for the paragraph wrapping legacy HTML content
pub const LEGACY_ID_PREFIX: &str = "legacy";

/// Generate a fresh id with the given prefix
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Generate a fresh block id
pub fn generate_block_id() -> String {
    generate_id(BLOCK_ID_PREFIX)
}
