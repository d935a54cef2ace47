//! Bind views, page groups and plain handlers to URL patterns.
//!
//! Each request to a view route gets a fresh view from the route's factory,
//! runs its `load`, and renders the resolved template unless the view
//! finished the response itself.

use crate::app::App;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::routes::options::RouteOptions;
use crate::template::TemplateSpec;
use crate::view::{Flow, FragmentAware, PageGroup, View};
use axum::{
    extract::Request,
    http::Method,
    response::{Html, IntoResponse, Response},
    routing::{any, on, MethodFilter, MethodRouter},
    Router,
};
use std::sync::Arc;

/// Full-page template plus, for adaptive routes, a fragment template and the
/// view's "render the fragment" signal.
pub(crate) struct TemplateChoice<V> {
    full: TemplateSpec,
    fragment: Option<(TemplateSpec, fn(&V) -> bool)>,
}

impl<V> TemplateChoice<V> {
    pub(crate) fn single(full: TemplateSpec) -> Self {
        TemplateChoice { full, fragment: None }
    }

    pub(crate) fn adaptive(full: TemplateSpec, fragment: TemplateSpec) -> Self
    where
        V: FragmentAware,
    {
        TemplateChoice {
            full,
            fragment: Some((fragment, V::should_render_fragment)),
        }
    }

    fn pick(&self, view: &V) -> &TemplateSpec {
        match &self.fragment {
            Some((fragment, wants_fragment)) if wants_fragment(view) => fragment,
            _ => &self.full,
        }
    }
}

struct ViewRoute<V, C, F> {
    app: Arc<App<C>>,
    factory: F,
    templates: TemplateChoice<V>,
}

impl<V, C, F> ViewRoute<V, C, F>
where
    V: View<C>,
    C: Send + Sync + 'static,
    F: Fn() -> V + Send + Sync + 'static,
{
    async fn serve(&self, req: Request) -> Response {
        let (parts, _body) = req.into_parts();
        let page_req = PageRequest::extract(parts).await;
        let mut sink = ResponseSink::new();
        let mut view = (self.factory)();

        match view.load(&page_req, &mut sink, &self.app).await {
            Ok(Flow::Finished) => return sink.into_response(),
            Err(e) if e.is_finished() => {
                tracing::warn!("view {} finished with error: {}", self.templates.full, e);
                return sink.into_response();
            }
            Err(e) => {
                tracing::error!("view load error for {}: {}", self.templates.full, e);
                return sink.merge_into(e);
            }
            Ok(Flow::Continue) => {}
        }

        let spec = self.templates.pick(&view);
        match self.app.render(&spec.file, &spec.block, &view) {
            Ok(body) => sink.merge_into(Html(body)),
            Err(e) => {
                tracing::error!("render error for {}: {}", spec, e);
                sink.merge_into(e)
            }
        }
    }
}

/// `"GET /path"` -> (Some(GET), "/path"); `"/path"` -> (None, "/path").
fn split_pattern(pattern: &str) -> (Option<MethodFilter>, &str) {
    let Some((method, path)) = pattern.split_once(' ') else {
        return (None, pattern);
    };
    let filter = Method::from_bytes(method.as_bytes())
        .ok()
        .and_then(|m| MethodFilter::try_from(m).ok());
    match filter {
        Some(f) => (Some(f), path.trim_start()),
        None => panic!("route pattern '{}' has an unsupported method prefix '{}'", pattern, method),
    }
}

fn bind_view<V, C, F>(
    router: Option<Router>,
    pattern: &str,
    route: ViewRoute<V, C, F>,
    options: RouteOptions,
) -> Router
where
    V: View<C>,
    C: Send + Sync + 'static,
    F: Fn() -> V + Send + Sync + 'static,
{
    let route = Arc::new(route);
    let handler = move |req: Request| {
        let route = Arc::clone(&route);
        async move { route.serve(req).await }
    };
    let (method, path) = split_pattern(pattern);
    let method_router = match method {
        Some(filter) => on(filter, handler),
        None => any(handler),
    };
    let (_, layers) = options.into_parts();
    router
        .unwrap_or_default()
        .route(path, RouteOptions::wrap(layers, method_router))
}

fn default_template<V, C>(pattern: &str) -> TemplateSpec
where
    V: View<C>,
    C: Send + Sync + 'static,
{
    if V::NAME.is_empty() {
        panic!(
            "view {} registered at '{}' has an empty NAME and no template option",
            std::any::type_name::<V>(),
            pattern
        );
    }
    TemplateSpec::for_view(V::NAME)
}

/// Serve `V` at `pattern`. Without a template option the template is
/// `V::NAME` with block `V::NAME`. `None` starts a new router.
pub fn register<V, C>(app: &Arc<App<C>>, router: Option<Router>, pattern: &str, options: RouteOptions) -> Router
where
    V: View<C> + Default,
    C: Send + Sync + 'static,
{
    register_with(app, router, pattern, V::default, options)
}

/// Like [`register`], with an explicit factory for views that need more than `Default`.
pub fn register_with<V, C, F>(
    app: &Arc<App<C>>,
    router: Option<Router>,
    pattern: &str,
    factory: F,
    options: RouteOptions,
) -> Router
where
    V: View<C>,
    C: Send + Sync + 'static,
    F: Fn() -> V + Send + Sync + 'static,
{
    let full = match &options.template {
        Some(spec) => spec.clone(),
        None => default_template::<V, C>(pattern),
    };
    let route = ViewRoute {
        app: Arc::clone(app),
        factory,
        templates: TemplateChoice::single(full),
    };
    bind_view(router, pattern, route, options)
}

/// One endpoint for both the full page and the htmx partial: renders
/// `fragment_spec` when the loaded view asks for a fragment, else `full_spec`.
///
/// Only the layers of `options` apply here. Setting `options.template` is a
/// mistake and trips a debug assertion.
pub fn register_adaptive<V, C>(
    app: &Arc<App<C>>,
    router: Option<Router>,
    pattern: &str,
    full_spec: &str,
    fragment_spec: &str,
    options: RouteOptions,
) -> Router
where
    V: View<C> + FragmentAware + Default,
    C: Send + Sync + 'static,
{
    debug_assert!(
        options.template.is_none(),
        "adaptive route '{}' takes its templates from full_spec and fragment_spec, not RouteOptions::template",
        pattern
    );
    let route = ViewRoute {
        app: Arc::clone(app),
        factory: V::default,
        templates: TemplateChoice::adaptive(TemplateSpec::parse(full_spec), TemplateSpec::parse(fragment_spec)),
    };
    bind_view(router, pattern, route, options)
}

/// Mount `G`'s routes under `prefix`; the group sees paths with the prefix removed.
pub fn register_group<G, C>(app: &Arc<App<C>>, router: Option<Router>, prefix: &str) -> Router
where
    G: PageGroup<C> + Default,
    C: Send + Sync + 'static,
{
    let group = G::default();
    mount(router.unwrap_or_default(), prefix, group.routes(app))
}

/// Bind a plain axum method router.
pub fn register_handler(router: Option<Router>, pattern: &str, handler: MethodRouter) -> Router {
    router.unwrap_or_default().route(pattern, handler)
}

pub(crate) fn mount(router: Router, prefix: &str, sub: Router) -> Router {
    let prefix = normalize_prefix(prefix);
    if prefix.is_empty() {
        router.merge(sub)
    } else {
        router.nest(&prefix, sub)
    }
}

/// `"games/"` -> `"/games"`; root prefixes become empty.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
