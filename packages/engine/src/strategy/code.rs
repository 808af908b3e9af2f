use blockwright_common::{data_from, Block};
use kuchiki::NodeRef;
use serde_json::json;

use super::{BlockStrategy, InlineMarkup};
use crate::dom::{attribute, first_descendant, has_tag};

/// Language used when the markup carries no `language-*` class
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

const LANGUAGE_CLASS_PREFIX: &str = "language-";

pub struct CodeStrategy {
    markup: InlineMarkup,
}

impl CodeStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for CodeStrategy {
    fn name(&self) -> &'static str {
        "code"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "code"
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        has_tag(node, &["pre"])
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let code_node = first_descendant(node, "code");

        let language = code_node
            .as_ref()
            .and_then(|code| attribute(code, "class"))
            .filter(|class| class.starts_with(LANGUAGE_CLASS_PREFIX))
            .map(|class| class.replace(LANGUAGE_CLASS_PREFIX, ""))
            .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string());

        let code = code_node.as_ref().unwrap_or(node).text_contents();

        Some(Block::new(
            "code",
            data_from(json!({ "code": code, "language": language })),
        ))
    }
}
