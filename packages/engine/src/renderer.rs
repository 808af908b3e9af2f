//! # Block Renderer
//!
//! Turns blocks into HTML by dispatching each one to the first strategy that
//! supports it. Rendering never fails: blocks without a strategy, and
//! strategies that produce nothing, contribute `""`.

use std::sync::Arc;

use blockwright_common::{parse_block_array, Block};
use tracing::{debug, info, instrument, trace};

use crate::strategy::{RenderServices, StrategyChain};

pub struct BlockRenderer {
    strategies: Arc<StrategyChain>,
}

impl BlockRenderer {
    pub fn new(strategies: Arc<StrategyChain>) -> Self {
        Self { strategies }
    }

    /// Renderer over the built-in strategies
    pub fn builtin(services: &RenderServices) -> Self {
        Self::new(Arc::new(StrategyChain::builtin(services)))
    }

    pub fn strategies(&self) -> &StrategyChain {
        &self.strategies
    }

    /// Render one block: prepare its data with the matching strategy, then render
    pub fn render_block(&self, block: &Block) -> String {
        let Some(strategy) = self.strategies.find_for_block(block) else {
            debug!(block_type = %block.block_type, block_id = %block.id, "No strategy supports block");
            return String::new();
        };

        trace!(block_type = %block.block_type, strategy = strategy.name(), "Rendering block");
        let prepared = Block {
            id: block.id.clone(),
            block_type: block.block_type.clone(),
            data: strategy.prepare_data(block.data.clone()),
        };
        strategy.render(&prepared)
    }

    /// Render blocks in order and concatenate the output
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        let html: String = blocks.iter().map(|block| self.render_block(block)).collect();
        info!(bytes = html.len(), "Rendered blocks");
        html
    }

    /// Render a JSON array of blocks; anything else renders to `""`
    pub fn render_json(&self, json: &str) -> String {
        match parse_block_array(json) {
            Some(blocks) => self.render_blocks(&blocks),
            None => {
                debug!("Content is not a JSON block array");
                String::new()
            }
        }
    }
}
