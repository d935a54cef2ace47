//! Per-route registration options.

use crate::template::TemplateSpec;
use axum::{
    extract::Request,
    response::IntoResponse,
    routing::{MethodRouter, Route},
};
use std::convert::Infallible;
use tower::{Layer, Service};

pub(crate) type Wrap = Box<dyn FnOnce(MethodRouter) -> MethodRouter + Send>;

/// Template override and middleware for one route.
#[derive(Default)]
pub struct RouteOptions {
    pub(crate) template: Option<TemplateSpec>,
    layers: Vec<Wrap>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"path/to/File"` or `"path/to/File:Block"`; see [`TemplateSpec::parse`].
    pub fn template(mut self, spec: &str) -> Self {
        self.template = Some(TemplateSpec::parse(spec));
        self
    }

    /// Wrap the route's handler. The first layer added is the outermost.
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.layers.push(Box::new(move |route: MethodRouter| route.layer(layer)));
        self
    }

    pub(crate) fn wrap(layers: Vec<Wrap>, route: MethodRouter) -> MethodRouter {
        layers.into_iter().rev().fold(route, |route, w| w(route))
    }

    pub(crate) fn into_parts(self) -> (Option<TemplateSpec>, Vec<Wrap>) {
        (self.template, self.layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_option_is_parsed() {
        let opts = RouteOptions::new().template("games/List:Rows");
        assert_eq!(
            opts.template,
            Some(TemplateSpec {
                file: "games/List".into(),
                block: "Rows".into()
            })
        );
    }
}
