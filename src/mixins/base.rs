use crate::app::App;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{Flow, LoadResult, Loader};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_BODY_CLASS: &str =
    "h-screen flex flex-col bg-gray-50 dark:bg-gray-900 text-gray-900 dark:text-gray-100";

/// Page chrome shared by every page.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BasePage {
    /// `<title>` text.
    pub title: String,
    /// CSS classes for `<body>`.
    pub body_class: String,
    /// Navigation tab to highlight.
    pub active_tab: String,
    /// Skip the default header.
    pub custom_header: bool,
    pub disable_splash_screen: bool,
    pub splash_title: String,
    pub splash_message: String,
    /// Raw data attributes for `<body>`.
    pub body_data_attributes: String,
}

#[async_trait]
impl<C> Loader<C> for BasePage
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, _req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        if self.body_class.is_empty() {
            self.body_class = DEFAULT_BODY_CLASS.to_string();
        }
        Ok(Flow::Continue)
    }
}
