use std::sync::Arc;

use blockwright_common::{field_is_truthy, is_truthy, Block, BlockData};
use kuchiki::NodeRef;
use serde_json::Value;
use tracing::debug;

use super::{BlockStrategy, InlineMarkup};
use crate::collaborators::{MediaRepository, MediaUrlGenerator};
use crate::dom::{attribute, has_tag};

/// Images backed by the media library
pub struct ImageStrategy {
    markup: InlineMarkup,
    media: Arc<dyn MediaRepository>,
    urls: Arc<dyn MediaUrlGenerator>,
}

impl ImageStrategy {
    pub fn new(
        markup: InlineMarkup,
        media: Arc<dyn MediaRepository>,
        urls: Arc<dyn MediaUrlGenerator>,
    ) -> Self {
        Self { markup, media, urls }
    }
}

/// Lookup key for a `mediaId` value: non-empty strings and non-zero numbers
fn media_key(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

impl BlockStrategy for ImageStrategy {
    fn name(&self) -> &'static str {
        "image"
    }

    fn supports(&self, block: &Block) -> bool {
        block.block_type == "image"
    }

    fn prepare_data(&self, mut data: BlockData) -> BlockData {
        let Some(media_id) = data.get("mediaId").and_then(media_key) else {
            return data;
        };

        match self.media.find(&media_id) {
            Some(media) => {
                let url = self.urls.generate_url(&media);
                data.insert("url".to_string(), Value::String(url));
                data.insert(
                    "alt".to_string(),
                    media.alt_text.map_or(Value::Null, Value::String),
                );
            }
            None if !field_is_truthy(&data, "url") => {
                debug!(media_id = %media_id, "Media not found and no fallback URL");
                data.insert("url".to_string(), Value::Null);
            }
            None => debug!(media_id = %media_id, "Media not found, keeping existing URL"),
        }

        data
    }

    fn render(&self, block: &Block) -> String {
        self.markup.render(block)
    }

    fn supports_node(&self, node: &NodeRef) -> bool {
        has_tag(node, &["img"])
    }

    fn create_from_node(&self, node: &NodeRef) -> Option<Block> {
        let mut data = BlockData::new();
        data.insert(
            "url".to_string(),
            Value::String(attribute(node, "src").unwrap_or_default()),
        );
        data.insert(
            "alt".to_string(),
            Value::String(attribute(node, "alt").unwrap_or_default()),
        );
        // A bare URL does not identify a library entry
        data.insert("mediaId".to_string(), Value::Null);
        Some(Block::new("image", data))
    }
}
