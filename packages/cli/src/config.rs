use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blockwright_engine::{
    BaseUrlGenerator, BlockRegistry, FragmentRenderer, InMemoryMediaLibrary, JinjaTemplateEngine,
    NullFragmentRenderer, RenderServices, StaticBlockSource, StaticFragmentRenderer,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_NAME: &str = "blockwright.config.json";

/// Blockwright configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON array of block records
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Directory holding named templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,

    /// JSON array of media records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,

    /// Pre-rendered fragments: reference → code → HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragments: Option<String>,
}

fn default_catalog() -> String {
    "blocks.json".to_string()
}

fn default_media_base_url() -> String {
    "/media".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_catalog_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.catalog)
    }

    /// Block registry over the configured catalog; a missing catalog file is empty
    pub fn registry(&self, cwd: &str) -> anyhow::Result<Arc<BlockRegistry>> {
        let path = self.get_catalog_path(cwd);
        let source = if path.exists() {
            StaticBlockSource::load(&path)?
        } else {
            warn!(path = %path.display(), "Catalog file not found, using an empty catalog");
            StaticBlockSource::default()
        };
        Ok(Arc::new(BlockRegistry::new(Arc::new(source))))
    }

    /// Everything the built-in strategies need, resolved against `cwd`
    pub fn services(&self, cwd: &str) -> anyhow::Result<RenderServices> {
        let root = PathBuf::from(cwd);

        let templates = match &self.templates_dir {
            Some(dir) => JinjaTemplateEngine::with_directory(root.join(dir)),
            None => JinjaTemplateEngine::new(),
        };

        let media = match &self.media {
            Some(path) => InMemoryMediaLibrary::load(&root.join(path))?,
            None => InMemoryMediaLibrary::default(),
        };

        let fragments: Arc<dyn FragmentRenderer> = match &self.fragments {
            Some(path) => Arc::new(StaticFragmentRenderer::load(&root.join(path))?),
            None => Arc::new(NullFragmentRenderer),
        };

        Ok(RenderServices {
            registry: self.registry(cwd)?,
            templates: Arc::new(templates),
            media: Arc::new(media),
            media_urls: Arc::new(BaseUrlGenerator::new(self.media_base_url.clone())),
            fragments,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            templates_dir: None,
            media: None,
            media_base_url: default_media_base_url(),
            fragments: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwright_common::Block;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "catalog": "config/blocks.json",
            "templatesDir": "templates",
            "media": "media.json",
            "mediaBaseUrl": "https://cdn.example.com",
            "fragments": "fragments.json"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.catalog, "config/blocks.json");
        assert_eq!(config.templates_dir, Some("templates".to_string()));
        assert_eq!(config.media, Some("media.json".to_string()));
        assert_eq!(config.media_base_url, "https://cdn.example.com");
        assert_eq!(config.fragments, Some("fragments.json".to_string()));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog, "blocks.json");
        assert_eq!(config.media_base_url, "/media");
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.catalog, "blocks.json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "catalog": "catalog.json" }"#,
        )
        .unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.catalog, "catalog.json");
        assert_eq!(config.media_base_url, "/media");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();
        assert!(Config::load(dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_services_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("blocks.json"),
            r#"[{ "code": "image", "htmlCode": "<img src=\"{{ data.url }}\">" }]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("media.json"),
            r#"[{ "id": 7, "path": "a.png", "altText": "A" }]"#,
        )
        .unwrap();

        let config = Config {
            media: Some("media.json".to_string()),
            ..Config::default()
        };
        let services = config.services(dir.path().to_str().unwrap()).unwrap();
        assert!(services.registry.contains("image"));

        let renderer = blockwright_engine::BlockRenderer::builtin(&services);
        let block: Block =
            serde_json::from_str(r#"{ "id": "i", "type": "image", "data": { "mediaId": 7 } }"#)
                .unwrap();
        assert_eq!(renderer.render_block(&block), "<img src=\"/media/a.png\">");
    }

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Config::default()
            .registry(dir.path().to_str().unwrap())
            .unwrap();
        assert!(registry.available_blocks().is_empty());
    }
}
