//! htmx request predicates and response header setters.
//!
//! Setters only touch the [`ResponseSink`]'s status and headers, so they must be
//! called before the registrar turns the sink into the final response. Nothing
//! enforces that; it is the same convention as writing headers before a body.

use crate::response::ResponseSink;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
pub const HX_BOOSTED: HeaderName = HeaderName::from_static("hx-boosted");
pub const HX_TARGET: HeaderName = HeaderName::from_static("hx-target");
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");
pub const HX_TRIGGER_NAME: HeaderName = HeaderName::from_static("hx-trigger-name");
pub const HX_CURRENT_URL: HeaderName = HeaderName::from_static("hx-current-url");
pub const HX_PROMPT: HeaderName = HeaderName::from_static("hx-prompt");

pub const HX_TRIGGER_AFTER_SETTLE: HeaderName = HeaderName::from_static("hx-trigger-after-settle");
pub const HX_TRIGGER_AFTER_SWAP: HeaderName = HeaderName::from_static("hx-trigger-after-swap");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");
pub const HX_LOCATION: HeaderName = HeaderName::from_static("hx-location");
pub const HX_REFRESH: HeaderName = HeaderName::from_static("hx-refresh");
pub const HX_PUSH_URL: HeaderName = HeaderName::from_static("hx-push-url");
pub const HX_REPLACE_URL: HeaderName = HeaderName::from_static("hx-replace-url");
pub const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
pub const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");
pub const HX_RESELECT: HeaderName = HeaderName::from_static("hx-reselect");

/// Status code htmx treats as "stop polling".
pub const STOP_POLLING_STATUS: u16 = 286;

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    header_str(headers, &HX_REQUEST) == "true"
}

pub fn is_boosted_request(headers: &HeaderMap) -> bool {
    header_str(headers, &HX_BOOSTED) == "true"
}

pub fn htmx_target(headers: &HeaderMap) -> &str {
    header_str(headers, &HX_TARGET)
}

pub fn htmx_trigger(headers: &HeaderMap) -> &str {
    header_str(headers, &HX_TRIGGER)
}

pub fn htmx_trigger_name(headers: &HeaderMap) -> &str {
    header_str(headers, &HX_TRIGGER_NAME)
}

pub fn htmx_current_url(headers: &HeaderMap) -> &str {
    header_str(headers, &HX_CURRENT_URL)
}

pub fn htmx_prompt(headers: &HeaderMap) -> &str {
    header_str(headers, &HX_PROMPT)
}

/// Chainable setters for htmx response headers.
pub struct HtmxResponse<'a> {
    sink: &'a mut ResponseSink,
}

impl<'a> HtmxResponse<'a> {
    pub fn new(sink: &'a mut ResponseSink) -> Self {
        HtmxResponse { sink }
    }

    fn set(&mut self, name: HeaderName, value: &str) -> &mut Self {
        self.sink.set_header(name, value);
        self
    }

    fn set_json(&mut self, name: HeaderName, value: &impl Serialize) -> &mut Self {
        match serde_json::to_string(value) {
            Ok(json) => {
                self.sink.set_header(name, &json);
            }
            Err(e) => tracing::warn!("htmx header {} not set: {}", name, e),
        }
        self
    }

    /// Client-side event to fire once the response is received.
    pub fn trigger(&mut self, event: &str) -> &mut Self {
        self.set(HX_TRIGGER, event)
    }

    /// `HX-Trigger: {"<event>": <data>}`.
    pub fn trigger_with_data(&mut self, event: &str, data: impl Serialize) -> &mut Self {
        let data = match serde_json::to_value(data) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("htmx trigger {} not set: {}", event, e);
                return self;
            }
        };
        let mut payload = Map::new();
        payload.insert(event.to_string(), data);
        self.set_json(HX_TRIGGER, &Value::Object(payload))
    }

    pub fn trigger_after_settle(&mut self, event: &str) -> &mut Self {
        self.set(HX_TRIGGER_AFTER_SETTLE, event)
    }

    pub fn trigger_after_swap(&mut self, event: &str) -> &mut Self {
        self.set(HX_TRIGGER_AFTER_SWAP, event)
    }

    /// Full client-side redirect.
    pub fn redirect(&mut self, url: &str) -> &mut Self {
        self.set(HX_REDIRECT, url)
    }

    /// Navigate without a full page reload.
    pub fn location(&mut self, url: &str) -> &mut Self {
        self.set(HX_LOCATION, url)
    }

    /// `HX-Location` with a JSON context (`path`, `target`, `swap`, ...).
    pub fn location_with_context(&mut self, context: &Map<String, Value>) -> &mut Self {
        self.set_json(HX_LOCATION, context)
    }

    pub fn refresh(&mut self) -> &mut Self {
        self.set(HX_REFRESH, "true")
    }

    pub fn push_url(&mut self, url: &str) -> &mut Self {
        self.set(HX_PUSH_URL, url)
    }

    pub fn replace_url(&mut self, url: &str) -> &mut Self {
        self.set(HX_REPLACE_URL, url)
    }

    pub fn retarget(&mut self, selector: &str) -> &mut Self {
        self.set(HX_RETARGET, selector)
    }

    pub fn reswap(&mut self, strategy: &str) -> &mut Self {
        self.set(HX_RESWAP, strategy)
    }

    pub fn reselect(&mut self, selector: &str) -> &mut Self {
        self.set(HX_RESELECT, selector)
    }

    pub fn stop_polling(&mut self) -> &mut Self {
        if let Ok(status) = StatusCode::from_u16(STOP_POLLING_STATUS) {
            self.sink.set_status(status);
        }
        self
    }
}
