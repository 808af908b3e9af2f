use blockwright_common::{Block, BlockData, EditMode, EDIT_MODE_KEY};
use kuchiki::NodeRef;
use serde_json::{json, Value};

use super::{BlockStrategy, InlineMarkup};
use crate::dom::{children_with_tags, inner_html, tag_name};

pub struct ListStrategy {
    markup: InlineMarkup,
}

impl ListStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for ListStrategy {
    fn name(&self) -> &'static str {
        "list"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "list"
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        matches!(tag_name(node), Some("ul" | "ol"))
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let list_type = tag_name(node)?.to_string();
        let items: Vec<Value> = children_with_tags(node, &["li"])
            .iter()
            .map(|li| json!({ "content": inner_html(li) }))
            .collect();

        let mut data = BlockData::new();
        data.insert("type".to_string(), Value::String(list_type));
        data.insert("items".to_string(), Value::Array(items));
        data.insert(EDIT_MODE_KEY.to_string(), EditMode::Visual.into());
        Some(Block::new("list", data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::*;

    #[test]
    fn test_unordered_list_import() {
        let strategy = ListStrategy::new(markup(vec![]));
        let ul = node("<ul><li>A</li><li>B</li></ul>");
        assert!(strategy.supports_node(&ul));

        let block = strategy.create_from_node(&ul).unwrap();
        assert_eq!(block.block_type, "list");
        assert_eq!(block.data["type"], "ul");
        assert_eq!(block.data["items"], json!([{ "content": "A" }, { "content": "B" }]));
        assert_eq!(block.data["editMode"], "visual");
    }

    #[test]
    fn test_ordered_list_keeps_item_markup() {
        let strategy = ListStrategy::new(markup(vec![]));
        let ol = node("<ol><li><strong>First</strong> step</li></ol>");
        let block = strategy.create_from_node(&ol).unwrap();
        assert_eq!(block.data["type"], "ol");
        assert_eq!(block.data["items"][0]["content"], "<strong>First</strong> step");
    }

    #[test]
    fn test_empty_list() {
        let strategy = ListStrategy::new(markup(vec![]));
        let block = strategy.create_from_node(&node("<ul></ul>")).unwrap();
        assert_eq!(block.data["items"], json!([]));
    }
}
