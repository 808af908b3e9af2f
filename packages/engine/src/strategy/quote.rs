use blockwright_common::{Block, BlockData, EditMode, EDIT_MODE_KEY};
use kuchiki::NodeRef;
use serde_json::Value;

use super::{BlockStrategy, InlineMarkup};
use crate::dom::{has_tag, inner_html};

pub struct QuoteStrategy {
    markup: InlineMarkup,
}

impl QuoteStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for QuoteStrategy {
    fn name(&self) -> &'static str {
        "quote"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "quote"
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        has_tag(node, &["blockquote"])
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let mut data = BlockData::new();
        data.insert("content".to_string(), Value::String(inner_html(node)));
        // Attribution does not survive plain HTML
        data.insert("author".to_string(), Value::String(String::new()));
        data.insert(EDIT_MODE_KEY.to_string(), EditMode::Visual.into());
        Some(Block::new("quote", data))
    }
}
