//! # Markdown Importer
//!
//! Rebuilds blocks from Markdown: the source is converted to HTML, parsed,
//! and every top-level node is offered to the strategies in priority order.
//! Nodes no strategy claims are kept as paragraphs when they carry text and
//! dropped otherwise.

use std::sync::Arc;

use blockwright_common::{generate_block_id, Block};
use kuchiki::NodeRef;
use tracing::{debug, info, instrument, trace};

use crate::dom::{has_meaningful_text, inner_html, is_blank_text, parse_fragment, tag_name};
use crate::markdown::{CommonMarkConverter, MarkdownConverter};
use crate::strategy::{text_block, StrategyChain};

pub struct MarkdownImporter {
    strategies: Arc<StrategyChain>,
    converter: Arc<dyn MarkdownConverter>,
}

impl MarkdownImporter {
    pub fn new(strategies: Arc<StrategyChain>, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            strategies,
            converter,
        }
    }

    /// Importer using the CommonMark converter
    pub fn with_commonmark(strategies: Arc<StrategyChain>) -> Self {
        Self::new(strategies, Arc::new(CommonMarkConverter::new()))
    }

    /// Convert Markdown into blocks with fresh ids
    #[instrument(skip(self, markdown), fields(bytes = markdown.len()))]
    pub fn convert_to_blocks(&self, markdown: &str) -> Vec<Block> {
        if markdown.trim().is_empty() {
            return Vec::new();
        }

        let html = self.converter.convert(markdown);
        let blocks = self.convert_html(&html);
        info!(blocks = blocks.len(), "Imported Markdown");
        blocks
    }

    /// Convert an HTML fragment into blocks with fresh ids
    pub fn convert_html(&self, html: &str) -> Vec<Block> {
        let Some(root) = parse_fragment(html) else {
            return Vec::new();
        };

        root.children()
            .filter(|node| !is_blank_text(node))
            .filter_map(|node| self.map_node(&node))
            .collect()
    }

    fn map_node(&self, node: &NodeRef) -> Option<Block> {
        for strategy in self.strategies.candidates_for_node(node) {
            if let Some(block) = strategy.create_from_node(node) {
                trace!(strategy = strategy.name(), block_type = %block.block_type, "Node imported");
                return Some(block.with_id(generate_block_id()));
            }
        }

        if !has_meaningful_text(node) {
            debug!(tag = tag_name(node).unwrap_or("#text"), "Dropping node without text");
            return None;
        }

        let inner = inner_html(node);
        let content = if inner.is_empty() {
            node.text_contents()
        } else {
            inner
        };
        Some(text_block(content).with_id(generate_block_id()))
    }
}
