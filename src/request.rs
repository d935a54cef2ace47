//! Read-only request data handed to views and loaders.

use axum::{
    body::Body,
    extract::{FromRequestParts, Path, Query},
    http::{request::Parts, HeaderMap, Method, Request, Uri},
};
use std::collections::HashMap;

/// One incoming request as seen by the loader chain: method, URI, headers,
/// query parameters and the path parameters captured by the router.
#[derive(Clone, Debug)]
pub struct PageRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: HashMap<String, String>,
    path_params: HashMap<String, String>,
}

impl PageRequest {
    /// Build from request parts, pulling path parameters out of the router's match.
    pub async fn extract(mut parts: Parts) -> Self {
        let path_params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, &()).await {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };
        Self::from_parts(parts, path_params)
    }

    pub fn from_parts(parts: Parts, path_params: HashMap<String, String>) -> Self {
        let query = parse_query(&parts.uri);
        PageRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            query,
            path_params,
        }
    }

    /// GET request for `uri` with the given headers. Mostly for tests.
    pub fn get(uri: &str, headers: &[(&'static str, &str)]) -> Self {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, _) = builder
            .body(Body::empty())
            .unwrap_or_else(|_| Request::new(Body::empty()))
            .into_parts();
        Self::from_parts(parts, HashMap::new())
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Query parameter value; empty values count as absent.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn query_or(&self, name: &str, default: &str) -> String {
        self.query(name).unwrap_or(default).to_string()
    }

    /// Integer query parameter; missing or unparseable values yield `default`.
    pub fn query_int(&self, name: &str, default: i64) -> i64 {
        self.query(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Header value as text; values that are not visible ASCII count as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }
}

/// First value wins for repeated keys.
fn parse_query(uri: &Uri) -> HashMap<String, String> {
    let mut out = HashMap::new();
    if let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(uri) {
        for (k, v) in pairs {
            out.entry(k).or_insert(v);
        }
    }
    out
}
