//! # Blockwright Engine
//!
//! Block catalog, rendering strategies, the block renderer and the Markdown
//! importer.
//!
//! ```text
//! ActiveBlockSource ─▶ BlockRegistry ─▶ StrategyChain ─┬▶ BlockRenderer    (blocks → HTML)
//!                                                      └▶ MarkdownImporter (Markdown → blocks)
//! ```

pub mod catalog;
pub mod collaborators;
pub mod dom;
pub mod error;
pub mod importer;
pub mod markdown;
pub mod renderer;
pub mod strategy;
pub mod template;

pub use catalog::BlockRegistry;
pub use collaborators::{
    ActiveBlockSource, BaseUrlGenerator, BlockRecord, CategoryRecord, FaqDirectory, FaqSummary,
    FragmentRenderer, InMemoryMediaLibrary, MediaRecord, MediaRepository, MediaUrlGenerator,
    NullFragmentRenderer, StaticBlockSource, StaticFaqDirectory, StaticFragmentRenderer,
};
pub use error::{SourceError, TemplateError};
pub use importer::MarkdownImporter;
pub use markdown::{CommonMarkConverter, MarkdownConverter};
pub use renderer::BlockRenderer;
pub use strategy::{BlockStrategy, RenderServices, StrategyChain};
pub use template::{JinjaTemplateEngine, TemplateEngine};
