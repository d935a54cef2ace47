use crate::app::App;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{Flow, LoadResult, Loader};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_SORT: &str = "modified_desc";
pub const DEFAULT_VIEW_MODE: &str = "table";

/// Search, sort and display mode from `q`, `sort` and `view`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Filtering {
    pub query: String,
    pub sort: String,
    /// "table", "grid", ...
    pub view_mode: String,
}

#[async_trait]
impl<C> Loader<C> for Filtering
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        self.query = req.query_or("q", "");
        self.sort = req.query_or("sort", DEFAULT_SORT);
        self.view_mode = req.query_or("view", DEFAULT_VIEW_MODE);
        Ok(Flow::Continue)
    }
}
