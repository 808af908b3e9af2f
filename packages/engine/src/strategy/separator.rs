use blockwright_common::{data_from, Block};
use kuchiki::NodeRef;
use serde_json::json;

use super::{BlockStrategy, InlineMarkup};
use crate::dom::has_tag;

pub struct SeparatorStrategy {
    markup: InlineMarkup,
}

impl SeparatorStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for SeparatorStrategy {
    fn name(&self) -> &'static str {
        "separator"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "separator"
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        has_tag(node, &["hr"])
    }

    fn create_from_node(&self, _node: &NodeRef) -> Option<Block> {
        Some(Block::new("separator", data_from(json!({ "style": "solid" }))))
    }
}
