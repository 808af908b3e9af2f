//! # Block Strategies
//!
//! One strategy per block type (or type family). A strategy answers four
//! questions about its type: does it handle this block, how is its data
//! normalized, how is it rendered, and can it be rebuilt from a DOM node.
//!
//! Strategies are tried in registration order and the first match wins, for
//! rendering and for import alike. The template fallback accepts every
//! catalogued type and is registered last.

mod code;
mod faq;
mod image;
mod list;
mod markup;
mod paragraph;
mod quote;
mod separator;
mod snippet;
mod table;
mod template;
mod video;

pub use code::CodeStrategy;
pub use faq::{FaqStrategy, FAQ_FRAGMENT_REFERENCE};
pub use image::ImageStrategy;
pub use list::ListStrategy;
pub use markup::{InlineMarkup, MarkupStrategy};
pub use paragraph::ParagraphStrategy;
pub(crate) use paragraph::text_block;
pub use quote::QuoteStrategy;
pub use separator::SeparatorStrategy;
pub use snippet::{SnippetStrategy, SNIPPET_PREFIX};
pub use table::TableStrategy;
pub use template::TemplateStrategy;
pub use video::VideoStrategy;

use std::sync::Arc;

use blockwright_common::{Block, BlockData};
use kuchiki::NodeRef;

use crate::catalog::BlockRegistry;
use crate::collaborators::{FragmentRenderer, MediaRepository, MediaUrlGenerator};
use crate::template::TemplateEngine;

/// Handler for one block type
pub trait BlockStrategy: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Does this strategy handle the block's type?
    fn supports(&self, block: &Block) -> bool;

    /// Normalize or enrich data before rendering
    fn prepare_data(&self, data: BlockData) -> BlockData {
        data
    }

    /// Render a block whose data has already been prepared
    fn render(&self, block: &Block) -> String;

    /// Can this strategy rebuild a block from the node?
    fn supports_node(&self, _node: &NodeRef) -> bool {
        false
    }

    /// Build a block (without id) from a node accepted by `supports_node`
    fn create_from_node(&self, _node: &NodeRef) -> Option<Block> {
        None
    }
}

/// Shared collaborators handed to the built-in strategies
#[derive(Clone)]
pub struct RenderServices {
    pub registry: Arc<BlockRegistry>,
    pub templates: Arc<dyn TemplateEngine>,
    pub media: Arc<dyn MediaRepository>,
    pub media_urls: Arc<dyn MediaUrlGenerator>,
    pub fragments: Arc<dyn FragmentRenderer>,
}

/// Ordered list of strategies; position is priority
pub struct StrategyChain {
    strategies: Vec<Box<dyn BlockStrategy>>,
}

impl StrategyChain {
    /// All built-in strategies in priority order
    pub fn builtin(services: &RenderServices) -> Self {
        let markup = InlineMarkup::new(services.registry.clone(), services.templates.clone());
        Self {
            strategies: vec![
                Box::new(SnippetStrategy::new(markup.clone())),
                Box::new(ParagraphStrategy::new(markup.clone())),
                Box::new(ImageStrategy::new(
                    markup.clone(),
                    services.media.clone(),
                    services.media_urls.clone(),
                )),
                Box::new(QuoteStrategy::new(markup.clone())),
                Box::new(TableStrategy::new(markup.clone())),
                Box::new(ListStrategy::new(markup.clone())),
                Box::new(CodeStrategy::new(markup.clone())),
                Box::new(MarkupStrategy::new("infobox", markup.clone())),
                Box::new(MarkupStrategy::new("cta", markup.clone())),
                Box::new(MarkupStrategy::new("howto", markup.clone())),
                Box::new(SeparatorStrategy::new(markup.clone())),
                Box::new(VideoStrategy::new(markup)),
                Box::new(FaqStrategy::new(services.fragments.clone())),
                Box::new(TemplateStrategy::new(
                    services.registry.clone(),
                    services.templates.clone(),
                )),
            ],
        }
    }

    /// Create an empty chain
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Append a strategy with the lowest priority so far
    pub fn add_strategy(&mut self, strategy: Box<dyn BlockStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategies(&self) -> &[Box<dyn BlockStrategy>] {
        &self.strategies
    }

    /// First strategy that supports the block
    pub fn find_for_block(&self, block: &Block) -> Option<&dyn BlockStrategy> {
        self.strategies
            .iter()
            .map(|strategy| strategy.as_ref())
            .find(|strategy| strategy.supports(block))
    }

    /// Strategies that accept the node, in priority order
    pub fn candidates_for_node<'a>(
        &'a self,
        node: &'a NodeRef,
    ) -> impl Iterator<Item = &'a dyn BlockStrategy> + 'a {
        self.strategies
            .iter()
            .map(|strategy| strategy.as_ref())
            .filter(move |strategy| strategy.supports_node(node))
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("StrategyChain")
            .field("strategies", &names)
            .finish()
    }
}
