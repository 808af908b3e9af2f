//! # Block Mutations
//!
//! Structural and data edits on a block sequence.
//!
//! ## Semantics
//!
//! - Blocks are located by id with a linear scan; the first match wins.
//! - A mutation whose target id or block type is unknown is a no-op. The
//!   outcome reports why, but callers are free to ignore it.
//! - Order in the sequence is the only positional signal; removing or moving
//!   a block keeps the sequence contiguous.

use blockwright_common::{
    generate_block_id, is_truthy, merge_shallow, Block, BlockData, Catalog, EditMode,
    EDIT_MODE_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Block type that gets a default heading level on transform
const HEADING_TYPE: &str = "heading";
const DEFAULT_HEADING_LEVEL: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Table structure edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowAction {
    AddRow,
    AddCol,
    ToggleHeader,
}

/// List/step collection edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionAction {
    Add,
    Remove,
}

/// Edits on a block sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new block of a catalogued type at `index` (or append)
    AddBlock {
        #[serde(rename = "type")]
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        data: BlockData,
    },

    RemoveBlock {
        id: String,
    },

    /// Swap a block with its neighbour
    MoveBlock {
        id: String,
        direction: Direction,
    },

    /// Set one data field
    UpdateProperty {
        id: String,
        property: String,
        value: Value,
    },

    /// Shallow-merge fields into the block's data
    UpdateData {
        id: String,
        data: BlockData,
    },

    /// Change the block's type, keeping edit mode and content
    TransformBlock {
        id: String,
        #[serde(rename = "type")]
        block_type: String,
    },

    ToggleEditMode {
        id: String,
    },

    UpdateRows {
        id: String,
        action: RowAction,
    },

    UpdateCollection {
        id: String,
        property: String,
        action: CollectionAction,
        #[serde(default)]
        index: Option<usize>,
    },
}

/// What applying a mutation did
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied,
    Noop { reason: String },
}

impl MutationOutcome {
    fn noop(reason: impl Into<String>) -> Self {
        MutationOutcome::Noop {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

impl Mutation {
    /// Id of the targeted block, if the mutation targets one
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::AddBlock { .. } => None,
            Mutation::RemoveBlock { id }
            | Mutation::MoveBlock { id, .. }
            | Mutation::UpdateProperty { id, .. }
            | Mutation::UpdateData { id, .. }
            | Mutation::TransformBlock { id, .. }
            | Mutation::ToggleEditMode { id }
            | Mutation::UpdateRows { id, .. }
            | Mutation::UpdateCollection { id, .. } => Some(id),
        }
    }

    /// Apply to a block sequence; `catalog` validates and seeds block types
    pub fn apply(&self, blocks: &mut Vec<Block>, catalog: &Catalog) -> MutationOutcome {
        match self {
            Mutation::AddBlock {
                block_type,
                index,
                data,
            } => Self::apply_add(blocks, catalog, block_type, *index, data),

            Mutation::RemoveBlock { id } => Self::apply_remove(blocks, id),

            Mutation::MoveBlock { id, direction } => Self::apply_move(blocks, id, *direction),

            Mutation::UpdateProperty {
                id,
                property,
                value,
            } => Self::with_block(blocks, id, |block| {
                block.data.insert(property.clone(), value.clone());
                MutationOutcome::Applied
            }),

            Mutation::UpdateData { id, data } => Self::with_block(blocks, id, |block| {
                block.data = merge_shallow(&block.data, data);
                MutationOutcome::Applied
            }),

            Mutation::TransformBlock { id, block_type } => {
                Self::apply_transform(blocks, catalog, id, block_type)
            }

            Mutation::ToggleEditMode { id } => Self::with_block(blocks, id, |block| {
                let next = block.edit_mode().toggled();
                block.data.insert(EDIT_MODE_KEY.to_string(), next.into());
                MutationOutcome::Applied
            }),

            Mutation::UpdateRows { id, action } => {
                Self::with_block(blocks, id, |block| Self::apply_rows(&mut block.data, *action))
            }

            Mutation::UpdateCollection {
                id,
                property,
                action,
                index,
            } => Self::with_block(blocks, id, |block| {
                Self::apply_collection(&mut block.data, property, *action, *index)
            }),
        }
    }

    fn position(blocks: &[Block], id: &str) -> Option<usize> {
        blocks.iter().position(|block| block.has_id(id))
    }

    fn with_block(
        blocks: &mut [Block],
        id: &str,
        edit: impl FnOnce(&mut Block) -> MutationOutcome,
    ) -> MutationOutcome {
        match Self::position(blocks, id) {
            Some(index) => edit(&mut blocks[index]),
            None => MutationOutcome::noop(format!("block not found: {}", id)),
        }
    }

    fn apply_add(
        blocks: &mut Vec<Block>,
        catalog: &Catalog,
        block_type: &str,
        index: Option<usize>,
        overrides: &BlockData,
    ) -> MutationOutcome {
        let Some(descriptor) = catalog.get(block_type) else {
            return MutationOutcome::noop(format!("unknown block type: {}", block_type));
        };

        let mut data = merge_shallow(&descriptor.default_data, overrides);
        data.insert(EDIT_MODE_KEY.to_string(), EditMode::Visual.into());

        // Snippet-style types carry their markup in the block
        if let Some(html) = &descriptor.html_code {
            if data.get("html").map_or(true, Value::is_null) {
                data.insert("html".to_string(), Value::String(html.clone()));
            }
        }

        let block = Block::new(block_type, data).with_id(generate_block_id());
        match index {
            Some(index) => blocks.insert(index.min(blocks.len()), block),
            None => blocks.push(block),
        }
        MutationOutcome::Applied
    }

    fn apply_remove(blocks: &mut Vec<Block>, id: &str) -> MutationOutcome {
        let before = blocks.len();
        blocks.retain(|block| !block.has_id(id));
        if blocks.len() == before {
            MutationOutcome::noop(format!("block not found: {}", id))
        } else {
            MutationOutcome::Applied
        }
    }

    fn apply_move(blocks: &mut [Block], id: &str, direction: Direction) -> MutationOutcome {
        let Some(index) = Self::position(blocks, id) else {
            return MutationOutcome::noop(format!("block not found: {}", id));
        };

        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&target| target < blocks.len()),
        };

        match target {
            Some(target) => {
                blocks.swap(index, target);
                MutationOutcome::Applied
            }
            None => MutationOutcome::noop("block is already at the boundary"),
        }
    }

    fn apply_transform(
        blocks: &mut [Block],
        catalog: &Catalog,
        id: &str,
        block_type: &str,
    ) -> MutationOutcome {
        let Some(descriptor) = catalog.get(block_type) else {
            return MutationOutcome::noop(format!("unknown block type: {}", block_type));
        };

        Self::with_block(blocks, id, |block| {
            let mut data = descriptor.default_data.clone();
            let edit_mode = match block.data.get(EDIT_MODE_KEY) {
                Some(mode) if !mode.is_null() => mode.clone(),
                _ => EditMode::Visual.into(),
            };
            data.insert(EDIT_MODE_KEY.to_string(), edit_mode);

            if let Some(content) = block.data.get("content").filter(|c| !c.is_null()) {
                data.insert("content".to_string(), content.clone());
            }

            if block_type == HEADING_TYPE && data.get("level").map_or(true, Value::is_null) {
                data.insert("level".to_string(), json!(DEFAULT_HEADING_LEVEL));
            }

            block.block_type = block_type.to_string();
            block.data = data;
            MutationOutcome::Applied
        })
    }

    fn apply_rows(data: &mut BlockData, action: RowAction) -> MutationOutcome {
        let mut rows = match data.get("rows") {
            Some(Value::Array(rows)) if !rows.is_empty() => rows.clone(),
            _ => return MutationOutcome::noop("table has no rows"),
        };

        match action {
            RowAction::AddRow => {
                let columns = rows[0]
                    .get("cells")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                let cells = vec![empty_cell(); columns];
                rows.push(json!({ "cells": cells }));
            }
            RowAction::AddCol => {
                for row in rows.iter_mut() {
                    if let Some(cells) = row.get_mut("cells").and_then(Value::as_array_mut) {
                        cells.push(empty_cell());
                    }
                }
            }
            RowAction::ToggleHeader => {
                let has_header = data.get("hasHeader").map_or(false, is_truthy);
                data.insert("hasHeader".to_string(), Value::Bool(!has_header));
            }
        }

        data.insert("rows".to_string(), Value::Array(rows));
        MutationOutcome::Applied
    }

    fn apply_collection(
        data: &mut BlockData,
        property: &str,
        action: CollectionAction,
        index: Option<usize>,
    ) -> MutationOutcome {
        let mut collection = match data.get(property) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        match (action, index) {
            (CollectionAction::Add, index) => {
                let item = if property == "items" {
                    json!({ "content": "" })
                } else {
                    json!({ "title": "", "content": "" })
                };
                match index {
                    Some(index) => {
                        let at = index.saturating_add(1).min(collection.len());
                        collection.insert(at, item);
                    }
                    None => collection.push(item),
                }
            }
            (CollectionAction::Remove, Some(index)) if index < collection.len() => {
                collection.remove(index);
            }
            (CollectionAction::Remove, _) => {}
        }

        data.insert(property.to_string(), Value::Array(collection));
        MutationOutcome::Applied
    }
}

fn empty_cell() -> Value {
    json!({ "content": "" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwright_common::{data_from, BlockTypeDescriptor};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "paragraph".to_string(),
            BlockTypeDescriptor {
                default_data: data_from(json!({ "content": "" })),
                template: Some("blocks/paragraph.html".to_string()),
                ..Default::default()
            },
        );
        catalog.insert(
            "heading".to_string(),
            BlockTypeDescriptor {
                default_data: data_from(json!({ "content": "" })),
                ..Default::default()
            },
        );
        catalog.insert(
            "tw_card".to_string(),
            BlockTypeDescriptor {
                html_code: Some("<div>{{ data.title }}</div>".to_string()),
                default_data: data_from(json!({ "title": "Card" })),
                ..Default::default()
            },
        );
        catalog
    }

    fn block(id: &str, block_type: &str, data: Value) -> Block {
        Block::new(block_type, data_from(data)).with_id(id)
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_add_block_merges_defaults() {
        let mut blocks = vec![];
        let outcome = Mutation::AddBlock {
            block_type: "paragraph".into(),
            index: None,
            data: data_from(json!({ "content": "Hi", "editMode": "html" })),
        }
        .apply(&mut blocks, &catalog());

        assert!(outcome.is_applied());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].id.starts_with("block_"));
        assert_eq!(blocks[0].data["content"], "Hi");
        // New blocks always start in visual mode
        assert_eq!(blocks[0].data["editMode"], "visual");
        assert!(!blocks[0].data.contains_key("html"));
    }

    #[test]
    fn test_add_block_copies_inline_markup() {
        let mut blocks = vec![];
        Mutation::AddBlock {
            block_type: "tw_card".into(),
            index: None,
            data: BlockData::new(),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["html"], "<div>{{ data.title }}</div>");
        assert_eq!(blocks[0].data["title"], "Card");

        Mutation::AddBlock {
            block_type: "tw_card".into(),
            index: None,
            data: data_from(json!({ "html": "<p>custom</p>" })),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[1].data["html"], "<p>custom</p>");
    }

    #[test]
    fn test_add_block_at_index() {
        let mut blocks = vec![
            block("a", "paragraph", json!({})),
            block("b", "paragraph", json!({})),
        ];
        Mutation::AddBlock {
            block_type: "heading".into(),
            index: Some(1),
            data: BlockData::new(),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[1].block_type, "heading");

        Mutation::AddBlock {
            block_type: "heading".into(),
            index: Some(99),
            data: BlockData::new(),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3].block_type, "heading");
    }

    #[test]
    fn test_add_unknown_type_is_noop() {
        let mut blocks = vec![];
        let outcome = Mutation::AddBlock {
            block_type: "mystery".into(),
            index: None,
            data: BlockData::new(),
        }
        .apply(&mut blocks, &catalog());
        assert!(!outcome.is_applied());
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_remove_block() {
        let mut blocks = vec![
            block("a", "paragraph", json!({})),
            block("b", "paragraph", json!({})),
        ];
        let outcome = Mutation::RemoveBlock { id: "a".into() }.apply(&mut blocks, &catalog());
        assert!(outcome.is_applied());
        assert_eq!(ids(&blocks), vec!["b"]);

        let outcome = Mutation::RemoveBlock { id: "zzz".into() }.apply(&mut blocks, &catalog());
        assert!(!outcome.is_applied());
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_move_block() {
        let mut blocks = vec![
            block("a", "paragraph", json!({})),
            block("b", "paragraph", json!({})),
            block("c", "paragraph", json!({})),
        ];
        Mutation::MoveBlock {
            id: "c".into(),
            direction: Direction::Up,
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(ids(&blocks), vec!["a", "c", "b"]);

        Mutation::MoveBlock {
            id: "a".into(),
            direction: Direction::Down,
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(ids(&blocks), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let mut blocks = vec![
            block("a", "paragraph", json!({})),
            block("b", "paragraph", json!({})),
        ];
        let up = Mutation::MoveBlock {
            id: "a".into(),
            direction: Direction::Up,
        }
        .apply(&mut blocks, &catalog());
        let down = Mutation::MoveBlock {
            id: "b".into(),
            direction: Direction::Down,
        }
        .apply(&mut blocks, &catalog());
        assert!(!up.is_applied());
        assert!(!down.is_applied());
        assert_eq!(ids(&blocks), vec!["a", "b"]);
    }

    #[test]
    fn test_update_property_and_data() {
        let mut blocks = vec![block("a", "image", json!({ "url": "x", "alt": "old" }))];
        Mutation::UpdateProperty {
            id: "a".into(),
            property: "alt".into(),
            value: json!("new"),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["alt"], "new");

        Mutation::UpdateData {
            id: "a".into(),
            data: data_from(json!({ "url": "y", "caption": "c" })),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["url"], "y");
        assert_eq!(blocks[0].data["alt"], "new");
        assert_eq!(blocks[0].data["caption"], "c");
    }

    #[test]
    fn test_transform_keeps_content_and_mode() {
        let mut blocks = vec![block(
            "a",
            "paragraph",
            json!({ "content": "Title", "editMode": "html", "extra": 1 }),
        )];
        Mutation::TransformBlock {
            id: "a".into(),
            block_type: "heading".into(),
        }
        .apply(&mut blocks, &catalog());

        assert_eq!(blocks[0].id, "a");
        assert_eq!(blocks[0].block_type, "heading");
        assert_eq!(blocks[0].data["content"], "Title");
        assert_eq!(blocks[0].data["editMode"], "html");
        assert_eq!(blocks[0].data["level"], 2);
        assert!(!blocks[0].data.contains_key("extra"));
    }

    #[test]
    fn test_transform_without_content() {
        let mut blocks = vec![block("a", "heading", json!({ "content": null }))];
        Mutation::TransformBlock {
            id: "a".into(),
            block_type: "paragraph".into(),
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["content"], "");
        assert_eq!(blocks[0].data["editMode"], "visual");
        assert!(!blocks[0].data.contains_key("level"));
    }

    #[test]
    fn test_transform_to_unknown_type_is_noop() {
        let original = vec![block("a", "paragraph", json!({ "content": "x" }))];
        let mut blocks = original.clone();
        let outcome = Mutation::TransformBlock {
            id: "a".into(),
            block_type: "mystery".into(),
        }
        .apply(&mut blocks, &catalog());
        assert!(!outcome.is_applied());
        assert_eq!(blocks, original);
    }

    #[test]
    fn test_toggle_edit_mode() {
        let mut blocks = vec![block("a", "paragraph", json!({}))];
        let toggle = Mutation::ToggleEditMode { id: "a".into() };
        toggle.apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["editMode"], "html");
        toggle.apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["editMode"], "visual");

        // Unrecognized modes go back to visual
        let mut blocks = vec![block("a", "paragraph", json!({ "editMode": "source" }))];
        toggle.apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["editMode"], "visual");
    }

    #[test]
    fn test_table_rows() {
        let mut blocks = vec![block(
            "t",
            "table",
            json!({ "rows": [{ "cells": [{ "content": "a" }, { "content": "b" }] }], "hasHeader": false }),
        )];
        let rows = |action| Mutation::UpdateRows {
            id: "t".into(),
            action,
        };

        rows(RowAction::AddRow).apply(&mut blocks, &catalog());
        assert_eq!(
            blocks[0].data["rows"][1],
            json!({ "cells": [{ "content": "" }, { "content": "" }] })
        );

        rows(RowAction::AddCol).apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["rows"][0]["cells"].as_array().unwrap().len(), 3);
        assert_eq!(blocks[0].data["rows"][1]["cells"].as_array().unwrap().len(), 3);

        rows(RowAction::ToggleHeader).apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["hasHeader"], true);
        rows(RowAction::ToggleHeader).apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["hasHeader"], false);
    }

    #[test]
    fn test_rows_on_empty_table_is_noop() {
        let mut blocks = vec![block("t", "table", json!({ "rows": [] }))];
        let outcome = Mutation::UpdateRows {
            id: "t".into(),
            action: RowAction::AddRow,
        }
        .apply(&mut blocks, &catalog());
        assert!(!outcome.is_applied());
        assert_eq!(blocks[0].data["rows"], json!([]));
    }

    #[test]
    fn test_collection_add_and_remove() {
        let mut blocks = vec![block("l", "list", json!({ "items": [{ "content": "a" }] }))];
        let op = |action, index| Mutation::UpdateCollection {
            id: "l".into(),
            property: "items".into(),
            action,
            index,
        };

        op(CollectionAction::Add, None).apply(&mut blocks, &catalog());
        op(CollectionAction::Add, Some(0)).apply(&mut blocks, &catalog());
        assert_eq!(
            blocks[0].data["items"],
            json!([{ "content": "a" }, { "content": "" }, { "content": "" }])
        );

        op(CollectionAction::Remove, Some(0)).apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["items"].as_array().unwrap().len(), 2);

        op(CollectionAction::Remove, Some(10)).apply(&mut blocks, &catalog());
        op(CollectionAction::Remove, None).apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_collection_add_with_huge_index_appends() {
        let mut blocks = vec![block("l", "list", json!({ "items": [{ "content": "a" }] }))];
        let mutation: Mutation = serde_json::from_value(json!({
            "UpdateCollection": {
                "id": "l",
                "property": "items",
                "action": "add",
                "index": usize::MAX
            }
        }))
        .unwrap();

        assert!(mutation.apply(&mut blocks, &catalog()).is_applied());
        assert_eq!(
            blocks[0].data["items"],
            json!([{ "content": "a" }, { "content": "" }])
        );
    }

    #[test]
    fn test_collection_steps_shape() {
        let mut blocks = vec![block("h", "howto", json!({}))];
        Mutation::UpdateCollection {
            id: "h".into(),
            property: "steps".into(),
            action: CollectionAction::Add,
            index: None,
        }
        .apply(&mut blocks, &catalog());
        assert_eq!(blocks[0].data["steps"], json!([{ "title": "", "content": "" }]));
    }

    #[test]
    fn test_unknown_id_is_noop_for_every_targeted_mutation() {
        let original = vec![block("a", "paragraph", json!({ "content": "x" }))];
        let mutations = vec![
            Mutation::MoveBlock { id: "z".into(), direction: Direction::Down },
            Mutation::UpdateProperty { id: "z".into(), property: "p".into(), value: json!(1) },
            Mutation::UpdateData { id: "z".into(), data: BlockData::new() },
            Mutation::TransformBlock { id: "z".into(), block_type: "heading".into() },
            Mutation::ToggleEditMode { id: "z".into() },
            Mutation::UpdateRows { id: "z".into(), action: RowAction::AddCol },
            Mutation::UpdateCollection {
                id: "z".into(),
                property: "items".into(),
                action: CollectionAction::Add,
                index: None,
            },
        ];
        for mutation in mutations {
            let mut blocks = original.clone();
            assert!(!mutation.apply(&mut blocks, &catalog()).is_applied());
            assert_eq!(blocks, original);
            assert_eq!(mutation.target_id(), Some("z"));
        }
    }

    #[test]
    fn test_mutation_json_shape() {
        let mutation: Mutation = serde_json::from_value(json!({
            "UpdateRows": { "id": "t", "action": "toggle-header" }
        }))
        .unwrap();
        assert_eq!(
            mutation,
            Mutation::UpdateRows { id: "t".into(), action: RowAction::ToggleHeader }
        );

        let mutation: Mutation = serde_json::from_value(json!({
            "AddBlock": { "type": "paragraph" }
        }))
        .unwrap();
        assert_eq!(
            mutation,
            Mutation::AddBlock { block_type: "paragraph".into(), index: None, data: BlockData::new() }
        );
    }
}
