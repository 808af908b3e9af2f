//! # Templates
//!
//! Block markup is written in Jinja syntax. Two sources exist: inline markup
//! stored on the block type (`htmlCode`) and named templates resolved
//! through a loader (`template`).
//!
//! Block data holds editor-produced HTML, so output is not auto-escaped;
//! templates escape plain-text fields explicitly with `|e`.

use std::path::Path;

use minijinja::{AutoEscape, Environment, ErrorKind};
use serde_json::Value;
use tracing::debug;

use crate::error::TemplateError;

/// Compiles and evaluates block templates against a JSON context
pub trait TemplateEngine: Send + Sync {
    /// Render template source given as a string
    fn render_inline(&self, source: &str, context: &Value) -> Result<String, TemplateError>;

    /// Render a template by name
    fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError>;
}

/// minijinja-backed engine
pub struct JinjaTemplateEngine {
    env: Environment<'static>,
}

impl JinjaTemplateEngine {
    /// Engine with no named templates
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Engine resolving named templates from a directory
    pub fn with_directory(dir: impl AsRef<Path>) -> Self {
        let mut engine = Self::new();
        debug!(dir = %dir.as_ref().display(), "Loading named templates from directory");
        engine.env.set_loader(minijinja::path_loader(dir));
        engine
    }

    /// Register a named template from source
    pub fn add_template(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        self.env.add_template_owned(name.into(), source.into())?;
        Ok(())
    }
}

impl Default for JinjaTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaTemplateEngine {
    fn render_inline(&self, source: &str, context: &Value) -> Result<String, TemplateError> {
        Ok(self.env.render_str(source, context)?)
    }

    fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::Render(e),
        })?;
        Ok(template.render(context)?)
    }
}
