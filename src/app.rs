//! Process-wide application wrapper: shared context plus the template renderer.

use crate::config::{TemplateConfig, DEFAULT_TEMPLATE_EXT};
use crate::error::RenderError;
use crate::routes::RouterBuilder;
use crate::template::setup_templates;
use minijinja::{Environment, Value};
use serde::Serialize;
use std::sync::Arc;

/// Replaces the default minijinja rendering: `(file, block, data) -> body`.
pub type RenderFn = Arc<dyn Fn(&str, &str, &Value) -> Result<String, RenderError> + Send + Sync>;

/// Created once at startup and shared as `Arc<App<C>>` by every route.
/// Nothing in this crate mutates `context`; interior mutability inside it is
/// the application's own business.
pub struct App<C> {
    pub context: C,
    templates: Option<Environment<'static>>,
    render_fn: Option<RenderFn>,
    extension: String,
}

impl<C> App<C>
where
    C: Send + Sync + 'static,
{
    pub fn new(context: C, templates: Environment<'static>) -> Self {
        App {
            context,
            templates: Some(templates),
            render_fn: None,
            extension: DEFAULT_TEMPLATE_EXT.to_string(),
        }
    }

    /// App with neither an environment nor a render function yet; see
    /// [`App::set_render_fn`].
    pub fn bare(context: C) -> Self {
        App {
            context,
            templates: None,
            render_fn: None,
            extension: DEFAULT_TEMPLATE_EXT.to_string(),
        }
    }

    /// App with a directory-backed environment built from `config`.
    pub fn from_config(context: C, config: &TemplateConfig) -> Self {
        App::new(context, setup_templates(config)).extension(config.extension.clone())
    }

    /// App whose pages are rendered by `render` instead of a template environment.
    pub fn with_renderer<F>(context: C, render: F) -> Self
    where
        F: Fn(&str, &str, &Value) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        App {
            context,
            templates: None,
            render_fn: Some(Arc::new(render)),
            extension: DEFAULT_TEMPLATE_EXT.to_string(),
        }
    }

    /// File extension appended to template file names (without the dot).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    pub fn set_render_fn(&mut self, render: RenderFn) {
        self.render_fn = Some(render);
    }

    pub fn templates(&self) -> Option<&Environment<'static>> {
        self.templates.as_ref()
    }

    /// Render `block` of template `file` with `data`. An empty block renders the whole file.
    pub fn render<T>(&self, file: &str, block: &str, data: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let value = Value::from_serialize(data);
        if let Some(render) = &self.render_fn {
            return render(file, block, &value);
        }
        let env = self.templates.as_ref().ok_or(RenderError::NotConfigured)?;
        let wrap = |source| RenderError::Template {
            file: file.to_string(),
            block: block.to_string(),
            source,
        };
        let name = format!("{}.{}", file, self.extension);
        let tmpl = env.get_template(&name).map_err(wrap)?;
        if block.is_empty() {
            tmpl.render(&value).map_err(wrap)
        } else {
            let mut captured = tmpl.render_captured_to(&value, std::io::sink()).map_err(wrap)?;
            captured.with_state_mut(|state| state.render_block(block)).map_err(wrap)
        }
    }

    /// Fluent route construction against this app.
    pub fn router(self: &Arc<Self>) -> RouterBuilder<C> {
        RouterBuilder::new(Arc::clone(self))
    }
}
