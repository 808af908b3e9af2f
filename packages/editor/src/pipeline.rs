//! # Editing Pipeline
//!
//! Coordinates edit and preview: Mutate → Render.
//!
//! The Pipeline manages:
//! - Applying mutations through the builder
//! - Re-rendering the preview HTML
//! - Caching the last preview, reused when a mutation changed nothing

use std::sync::Arc;

use blockwright_engine::BlockRenderer;
use tracing::{debug, instrument};

use crate::builder::ContentBuilder;
use crate::mutations::{Mutation, MutationOutcome};

/// Manages the full edit → preview pipeline
pub struct Pipeline {
    builder: ContentBuilder,
    renderer: Arc<BlockRenderer>,
    last_html: Option<String>,
}

impl Pipeline {
    pub fn new(builder: ContentBuilder, renderer: Arc<BlockRenderer>) -> Self {
        Self {
            builder,
            renderer,
            last_html: None,
        }
    }

    /// Apply a mutation and return the refreshed preview
    #[instrument(skip(self, mutation))]
    pub fn apply_mutation(&mut self, mutation: &Mutation) -> PipelineResult {
        let outcome = self.builder.apply(mutation);

        let cached = match outcome {
            MutationOutcome::Noop { .. } => self.last_html.clone(),
            MutationOutcome::Applied => None,
        };
        let html = match cached {
            Some(html) => {
                debug!("Nothing changed, reusing cached preview");
                html
            }
            None => self.full_render(),
        };

        PipelineResult {
            version: self.builder.document().version,
            outcome,
            html,
        }
    }

    /// Render the whole document (initial render, recovery)
    pub fn full_render(&mut self) -> String {
        let html = self.renderer.render_blocks(self.builder.blocks());
        self.last_html = Some(html.clone());
        html
    }

    pub fn builder(&self) -> &ContentBuilder {
        &self.builder
    }

    /// Mutable builder access; the cached preview is dropped since it may go stale
    pub fn builder_mut(&mut self) -> &mut ContentBuilder {
        self.last_html = None;
        &mut self.builder
    }

    pub fn last_html(&self) -> Option<&str> {
        self.last_html.as_deref()
    }

    /// Clear the preview cache (force a render on the next mutation)
    pub fn clear_cache(&mut self) {
        self.last_html = None;
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Document version after the mutation
    pub version: u64,

    pub outcome: MutationOutcome,

    /// Preview of the whole document
    pub html: String,
}
