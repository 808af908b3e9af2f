use std::sync::Arc;

use blockwright_common::Block;
use serde_json::{json, Value};
use tracing::{trace, warn};

use super::BlockStrategy;
use crate::catalog::BlockRegistry;
use crate::template::TemplateEngine;

/// Renders a block through the inline markup stored on its catalog entry.
///
/// The template sees `{data}`. Types missing from the catalog or without
/// inline markup render to `""`; template failures are logged and also
/// render to `""`.
#[derive(Clone)]
pub struct InlineMarkup {
    registry: Arc<BlockRegistry>,
    templates: Arc<dyn TemplateEngine>,
}

impl InlineMarkup {
    pub fn new(registry: Arc<BlockRegistry>, templates: Arc<dyn TemplateEngine>) -> Self {
        Self {
            registry,
            templates,
        }
    }

    pub fn render(&self, block: &Block) -> String {
        if block.block_type.is_empty() {
            return String::new();
        }
        let Some(markup) = self
            .registry
            .descriptor(&block.block_type)
            .and_then(|descriptor| descriptor.inline_markup())
        else {
            trace!(block_type = %block.block_type, "No inline markup configured");
            return String::new();
        };

        let context = json!({ "data": Value::Object(block.data.clone()) });
        match self.templates.render_inline(markup, &context) {
            Ok(html) => html,
            Err(e) => {
                warn!(block_type = %block.block_type, block_id = %block.id, error = %e, "Inline markup failed to render");
                String::new()
            }
        }
    }
}

/// Strategy for a fixed type literal that only renders inline markup
pub struct MarkupStrategy {
    block_type: &'static str,
    markup: InlineMarkup,
}

impl MarkupStrategy {
    pub fn new(block_type: &'static str, markup: InlineMarkup) -> Self {
        Self { block_type, markup }
    }
}

impl BlockStrategy for MarkupStrategy {
    fn name(&self) -> &'static str {
        self.block_type
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == self.block_type
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }
}
