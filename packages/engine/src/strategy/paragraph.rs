use blockwright_common::{Block, BlockData, EditMode, EDIT_MODE_KEY, PARAGRAPH_TYPE};
use kuchiki::NodeRef;
use serde_json::Value;

use super::{BlockStrategy, InlineMarkup};
use crate::dom::{inner_html, tag_name};

const TEXT_TAGS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Text blocks. Headings import as paragraphs that keep their heading tag
/// inside the content.
pub struct ParagraphStrategy {
    markup: InlineMarkup,
}

impl ParagraphStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for ParagraphStrategy {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == PARAGRAPH_TYPE
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        tag_name(node).map_or(false, |tag| TEXT_TAGS.contains(&tag))
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let tag = tag_name(node)?;
        let inner = inner_html(node);
        let content = if tag == "p" {
            inner
        } else {
            format!("<{tag}>{inner}</{tag}>")
        };

        Some(text_block(content))
    }
}

/// Paragraph block in visual mode
pub(crate) fn text_block(content: String) -> Block {
    let mut data = BlockData::new();
    data.insert("content".to_string(), Value::String(content));
    data.insert(EDIT_MODE_KEY.to_string(), EditMode::Visual.into());
    Block::new(PARAGRAPH_TYPE, data)
}
