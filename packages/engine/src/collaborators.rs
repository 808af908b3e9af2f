//! # Collaborators
//!
//! Interfaces to the systems the engine reads from but does not own:
//! the active-block store, the media library, the fragment renderer and
//! the FAQ directory. Each trait comes with a small in-memory
//! implementation that can be loaded from a JSON fixture.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use blockwright_common::BlockData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let text = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

fn default_true() -> bool {
    true
}

/// Accept a string or a number for record ids
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}

// ============================================================================
// Active blocks
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// A persisted block-type record as the store hands it out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRecord>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub default_data: BlockData,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub html_code: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl BlockRecord {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            label: None,
            category: None,
            icon: None,
            default_data: BlockData::new(),
            template: None,
            html_code: None,
            is_active: true,
        }
    }

    pub fn with_html_code(mut self, html: impl Into<String>) -> Self {
        self.html_code = Some(html.into());
        self
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn with_default_data(mut self, data: BlockData) -> Self {
        self.default_data = data;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_category(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.category = Some(CategoryRecord {
            code: Some(code.into()),
            label: Some(label.into()),
        });
        self
    }
}

/// Read-only source of the active block types
pub trait ActiveBlockSource: Send + Sync {
    fn find_active(&self) -> Vec<BlockRecord>;
}

/// Block records held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticBlockSource {
    records: Vec<BlockRecord>,
}

impl StaticBlockSource {
    pub fn new(records: Vec<BlockRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let records: Vec<BlockRecord> = read_json(path)?;
        debug!(path = %path.display(), records = records.len(), "Loaded block records");
        Ok(Self::new(records))
    }
}

impl ActiveBlockSource for StaticBlockSource {
    fn find_active(&self) -> Vec<BlockRecord> {
        self.records
            .iter()
            .filter(|record| record.is_active)
            .cloned()
            .collect()
    }
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

pub trait MediaRepository: Send + Sync {
    fn find(&self, id: &str) -> Option<MediaRecord>;
}

pub trait MediaUrlGenerator: Send + Sync {
    fn generate_url(&self, media: &MediaRecord) -> String;
}

/// Media records keyed by id
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaLibrary {
    records: HashMap<String, MediaRecord>,
}

impl InMemoryMediaLibrary {
    pub fn new(records: impl IntoIterator<Item = MediaRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let records: Vec<MediaRecord> = read_json(path)?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MediaRepository for InMemoryMediaLibrary {
    fn find(&self, id: &str) -> Option<MediaRecord> {
        self.records.get(id).cloned()
    }
}

/// Joins a base URL and the media path
#[derive(Debug, Clone)]
pub struct BaseUrlGenerator {
    base_url: String,
}

impl BaseUrlGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl MediaUrlGenerator for BaseUrlGenerator {
    fn generate_url(&self, media: &MediaRecord) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            media.path.trim_start_matches('/')
        )
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// Renders a sub-request (controller reference plus parameters) to HTML
pub trait FragmentRenderer: Send + Sync {
    fn render(&self, reference: &str, params: &BlockData) -> Option<String>;
}

/// Renders nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFragmentRenderer;

impl FragmentRenderer for NullFragmentRenderer {
    fn render(&self, _reference: &str, _params: &BlockData) -> Option<String> {
        None
    }
}

/// Pre-rendered fragments: reference → code → HTML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticFragmentRenderer {
    fragments: HashMap<String, HashMap<String, String>>,
}

impl StaticFragmentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        reference: impl Into<String>,
        code: impl Into<String>,
        html: impl Into<String>,
    ) {
        self.fragments
            .entry(reference.into())
            .or_default()
            .insert(code.into(), html.into());
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        read_json(path)
    }

    /// Codes registered under a reference, sorted
    pub fn codes(&self, reference: &str) -> Vec<String> {
        let mut codes: Vec<String> = self
            .fragments
            .get(reference)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        codes.sort();
        codes
    }
}

impl FragmentRenderer for StaticFragmentRenderer {
    fn render(&self, reference: &str, params: &BlockData) -> Option<String> {
        let code = params.get("code").and_then(Value::as_str)?;
        self.fragments.get(reference)?.get(code).cloned()
    }
}

// ============================================================================
// FAQ directory
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSummary {
    pub code: String,
    pub title: String,
}

/// Lists the FAQs a `faq_block` can point at
pub trait FaqDirectory: Send + Sync {
    fn find_all(&self) -> Vec<FaqSummary>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticFaqDirectory {
    faqs: Vec<FaqSummary>,
}

impl StaticFaqDirectory {
    pub fn new(faqs: Vec<FaqSummary>) -> Self {
        Self { faqs }
    }
}

impl FaqDirectory for StaticFaqDirectory {
    fn find_all(&self) -> Vec<FaqSummary> {
        self.faqs.clone()
    }
}
