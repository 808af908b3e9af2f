use std::sync::Arc;

use blockwright_common::{merge_recursive, Block, ContentSource};
use serde_json::{json, Value};
use tracing::{trace, warn};

use super::BlockStrategy;
use crate::catalog::BlockRegistry;
use crate::template::TemplateEngine;

/// Fallback for every catalogued type.
///
/// Block data is laid over the type's default data (recursively), then the
/// inline markup or named template is rendered with `{data, block}`. Inline
/// markup wins when both are configured.
pub struct TemplateStrategy {
    registry: Arc<BlockRegistry>,
    templates: Arc<dyn TemplateEngine>,
}

impl TemplateStrategy {
    pub fn new(registry: Arc<BlockRegistry>, templates: Arc<dyn TemplateEngine>) -> Self {
        Self {
            registry,
            templates,
        }
    }
}

impl BlockStrategy for TemplateStrategy {
    fn name(&self) -> &'static str {
        "template"
    }

    fn supports(&self, block: &Block) -> bool {
        !block.block_type.is_empty() && self.registry.contains(&block.block_type)
    }

    fn render(&self, block: &Block) -> String {
        if block.block_type.is_empty() {
            return String::new();
        }
        let Some(descriptor) = self.registry.descriptor(&block.block_type) else {
            return String::new();
        };

        let data = merge_recursive(&descriptor.default_data, &block.data);
        let merged = Block {
            data: data.clone(),
            ..block.clone()
        };
        let context = json!({ "block": merged, "data": Value::Object(data) });

        let rendered = match descriptor.content_source() {
            ContentSource::Inline(markup) => self.templates.render_inline(markup, &context),
            ContentSource::Template(name) => self.templates.render_named(name, &context),
            ContentSource::None => {
                trace!(block_type = %block.block_type, "Block type has no content source");
                return String::new();
            }
        };

        rendered.unwrap_or_else(|e| {
            warn!(block_type = %block.block_type, block_id = %block.id, error = %e, "Block template failed to render");
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{BlockRecord, StaticBlockSource};
    use crate::template::JinjaTemplateEngine;
    use blockwright_common::{data_from, BlockData};

    fn strategy(records: Vec<BlockRecord>, templates: JinjaTemplateEngine) -> TemplateStrategy {
        TemplateStrategy::new(
            Arc::new(BlockRegistry::new(Arc::new(StaticBlockSource::new(records)))),
            Arc::new(templates),
        )
    }

    #[test]
    fn test_supports_catalogued_types_only() {
        let s = strategy(vec![BlockRecord::new("testimonial")], JinjaTemplateEngine::new());
        assert!(s.supports(&Block::new("testimonial", BlockData::new())));
        assert!(!s.supports(&Block::new("unknown", BlockData::new())));
        assert!(!s.supports(&Block::new("", BlockData::new())));
    }

    #[test]
    fn test_named_template_with_merged_defaults() {
        let mut templates = JinjaTemplateEngine::new();
        templates
            .add_template(
                "blocks/testimonial.html",
                "<figure data-id=\"{{ block.id }}\">{{ data.quote }} ({{ data.meta.stars }}/{{ data.meta.max }})</figure>",
            )
            .unwrap();
        let s = strategy(
            vec![BlockRecord::new("testimonial")
                .with_template("blocks/testimonial.html")
                .with_default_data(data_from(json!({ "quote": "", "meta": { "stars": 0, "max": 5 } })))],
            templates,
        );

        let block = Block::new(
            "testimonial",
            data_from(json!({ "quote": "Great", "meta": { "stars": 4 } })),
        )
        .with_id("b1");
        assert_eq!(s.render(&block), "<figure data-id=\"b1\">Great (4/5)</figure>");
    }

    #[test]
    fn test_block_in_context_carries_merged_data() {
        let s = strategy(
            vec![BlockRecord::new("banner")
                .with_html_code("{{ block.data.tone }}-{{ block.type }}")
                .with_default_data(data_from(json!({ "tone": "calm" })))],
            JinjaTemplateEngine::new(),
        );
        assert_eq!(s.render(&Block::new("banner", BlockData::new())), "calm-banner");
    }

    #[test]
    fn test_inline_markup_preferred_over_template() {
        let mut templates = JinjaTemplateEngine::new();
        templates.add_template("banner.html", "named").unwrap();
        let s = strategy(
            vec![BlockRecord::new("banner")
                .with_template("banner.html")
                .with_html_code("inline")],
            templates,
        );
        assert_eq!(s.render(&Block::new("banner", BlockData::new())), "inline");
    }

    #[test]
    fn test_no_source_or_missing_template_renders_empty() {
        let s = strategy(
            vec![
                BlockRecord::new("bare"),
                BlockRecord::new("ghost").with_template("ghost.html"),
            ],
            JinjaTemplateEngine::new(),
        );
        assert_eq!(s.render(&Block::new("bare", BlockData::new())), "");
        assert_eq!(s.render(&Block::new("ghost", BlockData::new())), "");
        assert_eq!(s.render(&Block::new("unknown", BlockData::new())), "");
    }
}
