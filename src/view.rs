//! View and loader contracts, and the ordered loader chain.

use crate::app::App;
use crate::error::LoadError;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use async_trait::async_trait;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

/// What a loader tells its caller once it returns without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep going: run the next loader, then render.
    Continue,
    /// The response was fully handled (redirect, 4xx, ...). Stop and render nothing.
    Finished,
}

pub type LoadResult = Result<Flow, LoadError>;

/// One unit of per-request state that can populate itself from the request.
#[async_trait]
pub trait Loader<C>: Send
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult;
}

/// A page: mixins plus page-specific fields, rendered after a successful `load`.
///
/// `NAME` is the default template file and block when a route gives no
/// explicit template.
#[async_trait]
pub trait View<C>: Serialize + Send + 'static
where
    C: Send + Sync + 'static,
{
    const NAME: &'static str;

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult;
}

/// Views that can be served either as a full page or as a fragment swap.
pub trait FragmentAware {
    fn should_render_fragment(&self) -> bool;
}

/// A set of routes defined relative to wherever the group is mounted.
pub trait PageGroup<C>
where
    C: Send + Sync + 'static,
{
    fn routes(&self, app: &Arc<App<C>>) -> Router;
}

/// Ad hoc synchronous loader from a closure.
pub struct LoaderFn<F>(pub F);

#[async_trait]
impl<C, F> Loader<C> for LoaderFn<F>
where
    C: Send + Sync + 'static,
    F: FnMut(&PageRequest, &mut ResponseSink, &App<C>) -> LoadResult + Send,
{
    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult {
        (self.0)(req, res, app)
    }
}

/// Entry for [`load_all`].
pub fn loader<'a, C, L>(l: &'a mut L) -> Option<&'a mut (dyn Loader<C> + 'a)>
where
    C: Send + Sync + 'static,
    L: Loader<C> + 'a,
{
    let l: &'a mut (dyn Loader<C> + 'a) = l;
    Some(l)
}

/// Run `loaders` in order against one request. `None` entries are skipped.
/// Stops at the first error or `Flow::Finished` and returns it; otherwise
/// returns `Flow::Continue` after the last loader.
pub async fn load_all<'a, C>(
    req: &PageRequest,
    res: &mut ResponseSink,
    app: &App<C>,
    loaders: &mut [Option<&'a mut (dyn Loader<C> + 'a)>],
) -> LoadResult
where
    C: Send + Sync + 'static,
{
    for l in loaders.iter_mut().flatten() {
        if l.load(req, res, app).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Spy {
        calls: Arc<AtomicUsize>,
        outcome: fn() -> LoadResult,
    }

    #[async_trait]
    impl Loader<()> for Spy {
        async fn load(&mut self, _req: &PageRequest, _res: &mut ResponseSink, _app: &App<()>) -> LoadResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn spy(outcome: fn() -> LoadResult) -> (Spy, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Spy {
                calls: calls.clone(),
                outcome,
            },
            calls,
        )
    }

    fn app() -> App<()> {
        App::with_renderer((), |_, _, _| Ok(String::new()))
    }

    #[tokio::test]
    async fn stops_at_first_error() {
        let (mut m1, c1) = spy(|| Ok(Flow::Continue));
        let (mut m2, c2) = spy(|| Err(LoadError::msg("m2 failed")));
        let (mut m3, c3) = spy(|| Ok(Flow::Continue));
        let req = PageRequest::get("/", &[]);
        let mut res = ResponseSink::new();
        let out = load_all(&req, &mut res, &app(), &mut [loader(&mut m1), loader(&mut m2), loader(&mut m3)]).await;
        assert_eq!(out.unwrap_err().to_string(), "m2 failed");
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn finished_short_circuits_without_error() {
        let (mut m1, c1) = spy(|| Ok(Flow::Finished));
        let (mut m2, c2) = spy(|| Ok(Flow::Continue));
        let req = PageRequest::get("/", &[]);
        let mut res = ResponseSink::new();
        let out = load_all(&req, &mut res, &app(), &mut [loader(&mut m1), loader(&mut m2)]).await;
        assert_eq!(out.unwrap(), Flow::Finished);
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn none_entries_are_skipped() {
        let (mut m1, c1) = spy(|| Ok(Flow::Continue));
        let (mut m2, c2) = spy(|| Ok(Flow::Continue));
        let req = PageRequest::get("/", &[]);
        let mut res = ResponseSink::new();
        let out = load_all(&req, &mut res, &app(), &mut [loader(&mut m1), None, loader(&mut m2)]).await;
        assert_eq!(out.unwrap(), Flow::Continue);
        assert_eq!(c1.load(Ordering::SeqCst) + c2.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_chain_continues() {
        let req = PageRequest::get("/", &[]);
        let mut res = ResponseSink::new();
        let out = load_all::<()>(&req, &mut res, &app(), &mut []).await;
        assert_eq!(out.unwrap(), Flow::Continue);
    }

    #[tokio::test]
    async fn loader_fn_can_finish_the_response() {
        let mut require_id = LoaderFn(|req: &PageRequest, res: &mut ResponseSink, _app: &App<()>| {
            if req.query("id").is_none() {
                res.error(StatusCode::BAD_REQUEST, "id is required");
                return Ok(Flow::Finished);
            }
            Ok(Flow::Continue)
        });
        let req = PageRequest::get("/item", &[]);
        let mut res = ResponseSink::new();
        let out = load_all(&req, &mut res, &app(), &mut [loader(&mut require_id)]).await;
        assert_eq!(out.unwrap(), Flow::Finished);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.has_body());
    }
}
