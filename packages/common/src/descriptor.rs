//! # Block Type Descriptors
//!
//! Catalog metadata for one block type. A descriptor carries at most one
//! meaningful rendering source: inline markup (`htmlCode`) or a named
//! template. Exclusivity is checked upstream; here inline markup simply wins
//! when both are present.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::block::BlockData;
use crate::error::CommonError;

/// Active block types keyed by their code, in source order
pub type Catalog = IndexMap<String, BlockTypeDescriptor>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeDescriptor {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Category code (empty when the block has no category)
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub category_label: Option<String>,

    /// Skeleton merged under the data of new blocks of this type
    #[serde(default)]
    pub default_data: BlockData,

    /// Named template reference
    #[serde(default)]
    pub template: Option<String>,

    /// Inline template markup
    #[serde(default)]
    pub html_code: Option<String>,
}

/// Where the markup for a block type comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    Inline(&'a str),
    Template(&'a str),
    None,
}

impl BlockTypeDescriptor {
    /// Non-empty inline markup, if configured
    pub fn inline_markup(&self) -> Option<&str> {
        self.html_code.as_deref().filter(|code| !code.is_empty())
    }

    /// Non-empty named template, if configured
    pub fn template_name(&self) -> Option<&str> {
        self.template.as_deref().filter(|name| !name.is_empty())
    }

    /// Resolve the rendering source, preferring inline markup
    pub fn content_source(&self) -> ContentSource<'_> {
        if let Some(markup) = self.inline_markup() {
            ContentSource::Inline(markup)
        } else if let Some(name) = self.template_name() {
            ContentSource::Template(name)
        } else {
            ContentSource::None
        }
    }

    /// Check that exactly one rendering source is configured
    pub fn validate_content_source(&self) -> Result<(), CommonError> {
        match (self.inline_markup(), self.template_name()) {
            (Some(_), Some(_)) => Err(CommonError::BothContentSources),
            (None, None) => Err(CommonError::NoContentSource),
            _ => Ok(()),
        }
    }
}
