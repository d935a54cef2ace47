//! Fluent route construction: the same registrations as [`super::register`],
//! chained against one accumulating router.

use crate::app::App;
use crate::routes::options::RouteOptions;
use crate::routes::register::{mount, normalize_prefix, register_adaptive, register_group, register_with};
use crate::view::{FragmentAware, PageGroup, View};
use axum::{
    extract::Request,
    response::IntoResponse,
    routing::{MethodRouter, Route},
    Router,
};
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use tower::{Layer, Service};
use tower_http::services::ServeDir;

pub struct RouterBuilder<C> {
    app: Arc<App<C>>,
    router: Router,
}

impl<C> RouterBuilder<C>
where
    C: Send + Sync + 'static,
{
    pub fn new(app: Arc<App<C>>) -> Self {
        RouterBuilder {
            app,
            router: Router::new(),
        }
    }

    pub fn app(&self) -> &Arc<App<C>> {
        &self.app
    }

    pub fn page<V>(self, pattern: &str, options: RouteOptions) -> Self
    where
        V: View<C> + Default,
    {
        self.page_with(pattern, V::default, options)
    }

    pub fn page_with<V, F>(mut self, pattern: &str, factory: F, options: RouteOptions) -> Self
    where
        V: View<C>,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.router = register_with(&self.app, Some(self.router), pattern, factory, options);
        self
    }

    pub fn adaptive_page<V>(mut self, pattern: &str, full_spec: &str, fragment_spec: &str, options: RouteOptions) -> Self
    where
        V: View<C> + FragmentAware + Default,
    {
        self.router = register_adaptive::<V, C>(&self.app, Some(self.router), pattern, full_spec, fragment_spec, options);
        self
    }

    /// Nested routes under `prefix`, built by `setup` with relative patterns.
    pub fn group(mut self, prefix: &str, setup: impl FnOnce(RouterBuilder<C>) -> RouterBuilder<C>) -> Self {
        let sub = setup(RouterBuilder::new(Arc::clone(&self.app))).build();
        self.router = mount(self.router, prefix, sub);
        self
    }

    pub fn mount<G>(mut self, prefix: &str) -> Self
    where
        G: PageGroup<C> + Default,
    {
        self.router = register_group::<G, C>(&self.app, Some(self.router), prefix);
        self
    }

    pub fn handler(mut self, pattern: &str, handler: MethodRouter) -> Self {
        self.router = self.router.route(pattern, handler);
        self
    }

    /// Bind any tower service, e.g. a websocket endpoint or another app.
    pub fn service<T>(mut self, pattern: &str, service: T) -> Self
    where
        T: Service<Request, Error = Infallible> + Clone + Send + 'static,
        T::Response: IntoResponse,
        T::Future: Send + 'static,
    {
        self.router = self.router.route_service(pattern, service);
        self
    }

    /// Serve files from `dir` under `prefix`.
    pub fn static_dir(mut self, prefix: &str, dir: impl AsRef<Path>) -> Self {
        let files = ServeDir::new(dir.as_ref());
        let prefix = normalize_prefix(prefix);
        self.router = if prefix.is_empty() {
            self.router.fallback_service(files)
        } else {
            self.router.nest_service(&prefix, files)
        };
        self
    }

    /// Wrap every route registered so far. Later registrations are not wrapped.
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.router = self.router.layer(layer);
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn build(self) -> Router {
        self.router
    }
}
