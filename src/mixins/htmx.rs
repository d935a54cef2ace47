use crate::app::App;
use crate::htmx::{
    htmx_current_url, htmx_prompt, htmx_target, htmx_trigger, htmx_trigger_name, is_boosted_request,
    is_htmx_request,
};
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{FragmentAware, Flow, LoadResult, Loader};
use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::Serialize;

/// htmx request headers, copied as sent.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Htmx {
    pub is_htmx: bool,
    pub is_boosted: bool,
    pub target: String,
    pub trigger: String,
    pub trigger_name: String,
    pub current_url: String,
    pub prompt: String,
}

impl Htmx {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Htmx {
            is_htmx: is_htmx_request(headers),
            is_boosted: is_boosted_request(headers),
            target: htmx_target(headers).to_string(),
            trigger: htmx_trigger(headers).to_string(),
            trigger_name: htmx_trigger_name(headers).to_string(),
            current_url: htmx_current_url(headers).to_string(),
            prompt: htmx_prompt(headers).to_string(),
        }
    }
}

impl FragmentAware for Htmx {
    /// Boosted navigation still wants the full page.
    fn should_render_fragment(&self) -> bool {
        self.is_htmx && !self.is_boosted
    }
}

#[async_trait]
impl<C> Loader<C> for Htmx
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        *self = Htmx::from_headers(req.headers());
        Ok(Flow::Continue)
    }
}
