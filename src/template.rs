//! Named templates and the registries that resolve them.

use std::collections::HashMap;
use std::fmt;

use minijinja::{AutoEscape, Environment};
use portable_atomic_util::Arc;
use serde_json::Value;

use crate::error::TemplateError;

type TemplateFn = dyn Fn(&Value) -> Result<String, TemplateError> + Send + Sync;

/// A compiled template: a function from a data object to a markup string.
///
/// Cloning is cheap; clones share the same underlying function.
///
/// ```rust
/// use renderable::Template;
/// use serde_json::json;
///
/// let greeting = Template::new(|data| {
///     Ok(format!("<p>{}</p>", data["name"].as_str().unwrap_or_default()))
/// });
///
/// assert_eq!(greeting.render(&json!({ "name": "ada" })).unwrap(), "<p>ada</p>");
/// ```
#[derive(Clone)]
pub struct Template(Arc<Box<TemplateFn>>);

impl Template {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Value) -> Result<String, TemplateError> + Send + Sync + 'static,
    {
        Self(Arc::new(Box::new(render)))
    }

    pub fn render(&self, data: &Value) -> Result<String, TemplateError> {
        (self.0)(data)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Template(..)")
    }
}

/// Resolves template keys to compiled templates.
///
/// A registry is handed to [`Renderable::new`](crate::Renderable::new), which
/// performs the lookup exactly once.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRegistry {
    /// Look up the template registered under `key`.
    fn lookup(&self, key: &str) -> Option<Template>;
}

impl TemplateRegistry for HashMap<String, Template> {
    fn lookup(&self, key: &str) -> Option<Template> {
        self.get(key).cloned()
    }
}

/// A registry of MiniJinja templates compiled from source.
///
/// Every template is HTML auto-escaped, so `{{ message }}` inserts text
/// rather than markup.
///
/// ```rust
/// use renderable::{MiniJinjaRegistry, TemplateRegistry};
/// use serde_json::json;
///
/// let mut registry = MiniJinjaRegistry::new();
/// registry.add_template("view", "<div>{{ message }}</div>").unwrap();
///
/// let view = registry.lookup("view").unwrap();
/// assert_eq!(
///     view.render(&json!({ "message": "a < b" })).unwrap(),
///     "<div>a &lt; b</div>"
/// );
/// assert!(registry.lookup("missing").is_none());
/// ```
pub struct MiniJinjaRegistry {
    env: Arc<Environment<'static>>,
}

impl MiniJinjaRegistry {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        Self { env: Arc::new(env) }
    }

    /// Compile `source` and register it under `key`.
    ///
    /// Templates already handed out keep rendering against the environment
    /// they were resolved from.
    pub fn add_template(
        &mut self,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let (key, source) = (key.into(), source.into());
        match Arc::get_mut(&mut self.env) {
            Some(env) => env.add_template_owned(key, source)?,
            None => {
                let mut env = (*self.env).clone();
                env.add_template_owned(key, source)?;
                self.env = Arc::new(env);
            }
        }
        Ok(())
    }

    /// Build a registry from `(key, source)` pairs.
    pub fn from_sources<I, K, S>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (key, source) in sources {
            registry.add_template(key, source)?;
        }
        Ok(registry)
    }
}

impl Default for MiniJinjaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry for MiniJinjaRegistry {
    fn lookup(&self, key: &str) -> Option<Template> {
        self.env.get_template(key).ok()?;

        let env = self.env.clone();
        let key = key.to_string();
        Some(Template::new(move |data| {
            let template = env.get_template(&key)?;
            Ok(template.render(data)?)
        }))
    }
}
