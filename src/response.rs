//! Response sink shared by the loader chain and the registrar.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Status, headers and (for finished responses) a body, collected while a
/// view loads. Loaders set status and headers; only a loader that reports
/// `Flow::Finished` should write a body.
#[derive(Debug)]
pub struct ResponseSink {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Default for ResponseSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink {
    pub fn new() -> Self {
        ResponseSink {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set a header from text. Values that are not valid header text are skipped.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> &mut Self {
        match HeaderValue::from_str(value) {
            Ok(v) => {
                self.headers.insert(name, v);
            }
            Err(_) => tracing::warn!("dropping invalid value for header {}", name),
        }
        self
    }

    pub fn write_body(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// 303 See Other to `location`. Callers return `Flow::Finished` afterwards.
    pub fn redirect(&mut self, location: &str) -> &mut Self {
        self.status = StatusCode::SEE_OTHER;
        self.set_header(header::LOCATION, location)
    }

    /// Short plain-text response with the given status, e.g. a 400 for a missing parameter.
    pub fn error(&mut self, status: StatusCode, message: impl Into<String>) -> &mut Self {
        self.status = status;
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = Some(Body::from(message.into()));
        self
    }

    /// Combine status and headers collected so far with another response,
    /// keeping the other response's status only when this sink has none set.
    pub fn merge_into(self, inner: impl IntoResponse) -> Response {
        let mut resp = inner.into_response();
        if self.status != StatusCode::OK && resp.status() == StatusCode::OK {
            *resp.status_mut() = self.status;
        }
        // Replaces same-named headers of `inner`, keeps repeated sink values.
        resp.headers_mut().extend(self.headers);
        resp
    }
}

impl IntoResponse for ResponseSink {
    fn into_response(self) -> Response {
        let mut resp = Response::new(self.body.unwrap_or_else(Body::empty));
        *resp.status_mut() = self.status;
        *resp.headers_mut() = self.headers;
        resp
    }
}
