use crate::app::App;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{Flow, LoadResult, Loader};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
/// Largest page index whose offset fits in `usize` at any allowed page size.
pub const MAX_PAGE: usize = usize::MAX / MAX_PAGE_SIZE;
/// Page links shown around the current page.
const WINDOW: usize = 5;

/// `page` / `pageSize` query handling for list pages.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Pagination {
    /// 0-based.
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    /// Page numbers to link to.
    pub pages: Vec<usize>,
}

#[async_trait]
impl<C> Loader<C> for Pagination
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        let page = req.query_int("page", 0).max(0);
        self.current_page = usize::try_from(page).unwrap_or(MAX_PAGE).min(MAX_PAGE);
        let size = req.query_int("pageSize", DEFAULT_PAGE_SIZE as i64);
        self.page_size = if size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            (size as usize).min(MAX_PAGE_SIZE)
        };
        Ok(Flow::Continue)
    }
}

impl Pagination {
    /// Row offset for the current page.
    pub fn offset(&self) -> usize {
        self.current_page.saturating_mul(self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    /// Record the result size once the data is fetched.
    pub fn set_total(&mut self, total: usize, has_more: bool) {
        self.total_count = total;
        self.has_next_page = has_more;
        self.has_prev_page = self.current_page > 0;
        self.eval_pages();
    }

    pub fn eval_pages(&mut self) {
        self.pages = page_window(self.current_page, self.page_size, self.total_count);
    }

    pub fn prev_page(&self) -> usize {
        self.current_page.saturating_sub(1)
    }

    pub fn next_page(&self) -> usize {
        self.current_page.saturating_add(1)
    }
}

/// Up to five page numbers centered on `current`, clamped to
/// `[0, ceil(total_count / page_size))`. Empty when there is at most one page.
pub fn page_window(current: usize, page_size: usize, total_count: usize) -> Vec<usize> {
    if total_count == 0 || page_size == 0 {
        return Vec::new();
    }
    let total_pages = total_count.div_ceil(page_size);
    if total_pages <= 1 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(WINDOW / 2);
    let mut end = start.saturating_add(WINDOW);
    if end > total_pages {
        end = total_pages;
        start = end.saturating_sub(WINDOW);
    }
    (start..end).collect()
}
