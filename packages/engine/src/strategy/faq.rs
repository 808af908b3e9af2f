use std::sync::Arc;

use blockwright_common::{is_truthy, Block, BlockData};
use serde_json::Value;
use tracing::debug;

use super::BlockStrategy;
use crate::collaborators::FragmentRenderer;

/// Fragment rendering an FAQ by its code
pub const FAQ_FRAGMENT_REFERENCE: &str = "faq:show";

/// `faq_block` renders the referenced FAQ through the fragment renderer
/// instead of catalog markup.
pub struct FaqStrategy {
    fragments: Arc<dyn FragmentRenderer>,
}

impl FaqStrategy {
    pub fn new(fragments: Arc<dyn FragmentRenderer>) -> Self {
        Self { fragments }
    }
}

impl BlockStrategy for FaqStrategy {
    fn name(&self) -> &'static str {
        "faq_block"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "faq_block"
    }

    fn render(&self, block: &Block) -> String {
        let Some(code) = block.data.get("faqCode").filter(|code| is_truthy(code)) else {
            return String::new();
        };

        let mut params = BlockData::new();
        params.insert("code".to_string(), code.clone());
        self.fragments
            .render(FAQ_FRAGMENT_REFERENCE, &params)
            .unwrap_or_else(|| {
                debug!(faq_code = %code, "FAQ fragment rendered nothing");
                String::new()
            })
    }
}
