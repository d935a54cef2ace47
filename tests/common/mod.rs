#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use pagekit::{App, RenderError};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Context the test apps share.
pub struct Ctx {
    pub greeting: String,
}

/// (file, block, data) for every render call.
pub type Calls = Arc<Mutex<Vec<(String, String, serde_json::Value)>>>;

pub fn spy_app() -> (Arc<App<Ctx>>, Calls) {
    let calls: Calls = Arc::default();
    let seen = calls.clone();
    let app = App::with_renderer(
        Ctx {
            greeting: "hello".into(),
        },
        move |file, block, data| {
            let json = serde_json::to_value(data).map_err(|e| RenderError::Custom(e.to_string()))?;
            seen.lock().unwrap().push((file.to_string(), block.to_string(), json));
            Ok(format!("rendered {}[{}]", file, block))
        },
    );
    (Arc::new(app), calls)
}

pub async fn send(router: Router, method: &str, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
        req = req.header(*k, *v);
    }
    router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

pub async fn get(router: Router, uri: &str) -> Response<Body> {
    send(router, "GET", uri, &[]).await
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
