//! Mutation sequences over a whole document

use std::collections::HashSet;

use blockwright_common::{data_from, BlockData, BlockTypeDescriptor, Catalog};
use blockwright_editor::{ContentDocument, Direction, Mutation};
use serde_json::json;

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for code in ["paragraph", "quote", "separator"] {
        catalog.insert(
            code.to_string(),
            BlockTypeDescriptor {
                default_data: data_from(json!({ "content": "" })),
                ..Default::default()
            },
        );
    }
    catalog
}

fn add(block_type: &str, index: Option<usize>) -> Mutation {
    Mutation::AddBlock {
        block_type: block_type.to_string(),
        index,
        data: BlockData::new(),
    }
}

fn types(doc: &ContentDocument) -> Vec<&str> {
    doc.blocks().iter().map(|b| b.block_type.as_str()).collect()
}

#[test]
fn test_ids_stay_unique() {
    let mut doc = ContentDocument::new();
    for _ in 0..50 {
        doc.apply(&add("paragraph", Some(0)), &catalog());
    }
    let ids: HashSet<&str> = doc.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
    assert_eq!(doc.version, 50);
}

#[test]
fn test_insertions_keep_order() {
    let mut doc = ContentDocument::new();
    doc.apply(&add("paragraph", None), &catalog());
    doc.apply(&add("separator", None), &catalog());
    doc.apply(&add("quote", Some(1)), &catalog());
    doc.apply(&add("quote", Some(0)), &catalog());
    assert_eq!(types(&doc), vec!["quote", "paragraph", "quote", "separator"]);
}

#[test]
fn test_move_round_trip_restores_order() {
    let mut doc = ContentDocument::new();
    for block_type in ["paragraph", "quote", "separator"] {
        doc.apply(&add(block_type, None), &catalog());
    }
    let before = doc.blocks().to_vec();
    let id = doc.blocks()[1].id.clone();

    doc.apply(&Mutation::MoveBlock { id: id.clone(), direction: Direction::Up }, &catalog());
    assert_eq!(types(&doc), vec!["quote", "paragraph", "separator"]);
    doc.apply(&Mutation::MoveBlock { id, direction: Direction::Down }, &catalog());
    assert_eq!(doc.blocks(), before.as_slice());
}

#[test]
fn test_remove_everything() {
    let mut doc = ContentDocument::new();
    for _ in 0..3 {
        doc.apply(&add("paragraph", None), &catalog());
    }
    let ids: Vec<String> = doc.blocks().iter().map(|b| b.id.clone()).collect();
    for id in ids {
        assert!(doc.apply(&Mutation::RemoveBlock { id }, &catalog()).is_applied());
    }
    assert!(doc.is_empty());
    assert_eq!(doc.to_json().unwrap(), "[]");
}

#[test]
fn test_mutations_from_json() {
    let mut doc = ContentDocument::mount(Some(
        r#"[{"id":"a","type":"paragraph","data":{"content":"A"}},
            {"id":"b","type":"quote","data":{"content":"B","author":""}}]"#,
    ));
    let mutations: Vec<Mutation> = serde_json::from_value(json!([
        { "MoveBlock": { "id": "b", "direction": "up" } },
        { "UpdateProperty": { "id": "b", "property": "author", "value": "Ada" } },
        { "TransformBlock": { "id": "a", "type": "quote" } },
        { "ToggleEditMode": { "id": "a" } },
        { "RemoveBlock": { "id": "missing" } }
    ]))
    .unwrap();

    let applied = mutations
        .iter()
        .filter(|m| doc.apply(m, &catalog()).is_applied())
        .count();
    assert_eq!(applied, 4);

    let blocks = doc.blocks();
    assert_eq!(blocks[0].id, "b");
    assert_eq!(blocks[0].data["author"], "Ada");
    assert_eq!(blocks[1].block_type, "quote");
    assert_eq!(blocks[1].data["content"], "A");
    assert_eq!(blocks[1].data["editMode"], "html");
}
