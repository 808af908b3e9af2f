use blockwright_common::Block;

use super::{BlockStrategy, InlineMarkup};

/// Type prefix of snippet blocks
pub const SNIPPET_PREFIX: &str = "tw_";

/// Snippets are block types discovered at runtime (`tw_*`), rendered from
/// their inline markup.
pub struct SnippetStrategy {
    markup: InlineMarkup,
}

impl SnippetStrategy {
    pub fn new(markup: InlineMarkup) -> Self {
        Self { markup }
    }
}

impl BlockStrategy for SnippetStrategy {
    fn name(&self) -> &'static str {
        "snippet"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type.starts_with(SNIPPET_PREFIX)
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }
}
