mod common;

use async_trait::async_trait;
use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::{from_fn, Next},
    response::Response,
    routing::get as get_route,
    Router,
};
use common::{body_text, get, send, spy_app, Ctx};
use pagekit::{
    register, register_adaptive, register_group, App, FragmentAware, Flow, Htmx, LoadResult, Loader, PageGroup,
    PageRequest, ResponseSink, RouteOptions, TemplateConfig, View,
};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tower::service_fn;

#[derive(Default, Serialize)]
struct GameDetail {
    id: String,
}

#[async_trait]
impl View<Ctx> for GameDetail {
    const NAME: &'static str = "GameDetail";

    async fn load(&mut self, req: &PageRequest, _res: &mut ResponseSink, _app: &App<Ctx>) -> LoadResult {
        self.id = req.path_param("id").unwrap_or_default().to_string();
        Ok(Flow::Continue)
    }
}

#[derive(Default, Serialize)]
struct GameList {
    title: String,
}

#[async_trait]
impl View<Ctx> for GameList {
    const NAME: &'static str = "GameList";

    async fn load(&mut self, _req: &PageRequest, _res: &mut ResponseSink, app: &App<Ctx>) -> LoadResult {
        self.title = app.context.greeting.clone();
        Ok(Flow::Continue)
    }
}

#[derive(Default)]
struct Games;

impl PageGroup<Ctx> for Games {
    fn routes(&self, app: &Arc<App<Ctx>>) -> Router {
        let router = register::<GameList, _>(app, None, "/", RouteOptions::new());
        register::<GameDetail, _>(app, Some(router), "/:id", RouteOptions::new())
    }
}

#[derive(Default, Serialize)]
struct Search {
    #[serde(flatten)]
    htmx: Htmx,
    query: String,
}

#[async_trait]
impl View<Ctx> for Search {
    const NAME: &'static str = "Search";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<Ctx>) -> LoadResult {
        self.htmx.load(req, res, app).await?;
        self.query = req.query_or("q", "");
        Ok(Flow::Continue)
    }
}

impl FragmentAware for Search {
    fn should_render_fragment(&self) -> bool {
        self.htmx.should_render_fragment()
    }
}

fn rendered(calls: &common::Calls) -> Vec<(String, String)> {
    calls.lock().unwrap().iter().map(|(f, b, _)| (f.clone(), b.clone())).collect()
}

#[tokio::test]
async fn group_routes_see_prefix_stripped_paths() {
    let (app, calls) = spy_app();
    let router = register_group::<Games, _>(&app, None, "/games");

    let resp = get(router.clone(), "/games/7").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "rendered GameDetail[GameDetail]");
    assert_eq!(calls.lock().unwrap()[0].2["id"], "7");

    assert_eq!(get(router.clone(), "/games").await.status(), StatusCode::OK);
    assert_eq!(get(router, "/7").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_group_merges_into_router() {
    let (app, _) = spy_app();
    let router = register_group::<Games, _>(&app, None, "/");
    assert_eq!(get(router, "/9").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn adaptive_route_picks_template_per_request() {
    let (app, calls) = spy_app();
    let router = register_adaptive::<Search, _>(
        &app,
        None,
        "/search",
        "SearchPage",
        "SearchPage:results",
        RouteOptions::new(),
    );

    get(router.clone(), "/search?q=chess").await;
    send(router.clone(), "GET", "/search?q=chess", &[("HX-Request", "true")]).await;
    send(
        router,
        "GET",
        "/search?q=chess",
        &[("HX-Request", "true"), ("HX-Boosted", "true")],
    )
    .await;

    assert_eq!(
        rendered(&calls),
        vec![
            ("SearchPage".to_string(), "SearchPage".to_string()),
            ("SearchPage".to_string(), "results".to_string()),
            ("SearchPage".to_string(), "SearchPage".to_string()),
        ]
    );
    assert_eq!(calls.lock().unwrap()[1].2["query"], "chess");
    assert_eq!(calls.lock().unwrap()[1].2["is_htmx"], true);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "takes its templates from full_spec and fragment_spec")]
fn adaptive_route_rejects_template_option() {
    let (app, _) = spy_app();
    register_adaptive::<Search, _>(
        &app,
        None,
        "/search",
        "SearchPage",
        "SearchPage:results",
        RouteOptions::new().template("Other:Block"),
    );
}

#[tokio::test]
async fn builder_chains_pages_groups_and_handlers() {
    let (app, calls) = spy_app();
    let router = app
        .router()
        .page::<GameList>("/", RouteOptions::new())
        .group("/a", |a| {
            a.group("/b", |b| b.page::<GameDetail>("/c/:id", RouteOptions::new()))
        })
        .mount::<Games>("/games")
        .adaptive_page::<Search>("/search", "Search", "Search:rows", RouteOptions::new())
        .handler("/health", get_route(|| async { "ok" }))
        .service("/version", service_fn(|_req: Request| async { Ok::<_, Infallible>("1.0") }))
        .build();

    assert_eq!(get(router.clone(), "/").await.status(), StatusCode::OK);
    assert_eq!(get(router.clone(), "/a/b/c/5").await.status(), StatusCode::OK);
    assert_eq!(get(router.clone(), "/games/3").await.status(), StatusCode::OK);
    send(router.clone(), "GET", "/search", &[("HX-Request", "true")]).await;
    assert_eq!(body_text(get(router.clone(), "/health").await).await, "ok");
    assert_eq!(body_text(send(router.clone(), "POST", "/version", &[]).await).await, "1.0");
    assert_eq!(get(router, "/c/5").await.status(), StatusCode::NOT_FOUND);

    let calls = calls.lock().unwrap();
    assert_eq!(calls[1].2["id"], "5");
    assert_eq!(calls[2].2["id"], "3");
    assert_eq!((calls[3].0.as_str(), calls[3].1.as_str()), ("Search", "rows"));
}

async fn mark_wrapped(req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    resp.headers_mut().insert("x-wrapped", HeaderValue::from_static("yes"));
    resp
}

#[tokio::test]
async fn builder_layer_wraps_earlier_routes_only() {
    let (app, _) = spy_app();
    let router = app
        .router()
        .page::<GameList>("/list", RouteOptions::new())
        .layer(from_fn(mark_wrapped))
        .page::<GameDetail>("/detail/:id", RouteOptions::new())
        .build();

    let resp = get(router.clone(), "/list").await;
    assert_eq!(resp.headers()["x-wrapped"], "yes");
    let resp = get(router, "/detail/1").await;
    assert!(resp.headers().get("x-wrapped").is_none());
}

#[tokio::test]
async fn static_dir_serves_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.css"), "body{}").unwrap();
    let (app, _) = spy_app();
    let router = app
        .router()
        .static_dir("/static", dir.path())
        .page::<GameList>("/", RouteOptions::new())
        .build();

    let resp = get(router.clone(), "/static/app.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "body{}");
    assert_eq!(get(router, "/static/missing.css").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn renders_real_templates_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("games")).unwrap();
    std::fs::write(
        dir.path().join("GameDetail.html"),
        "<html>{% block GameDetail %}Game {{ id }}{% endblock %}</html>",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("games/List.html"),
        "<ul>{% block items %}<li>none</li>{% endblock %}</ul>",
    )
    .unwrap();

    let config = TemplateConfig::new([dir.path()]);
    let app = Arc::new(App::from_config(
        Ctx {
            greeting: "hi".into(),
        },
        &config,
    ));
    let router = app
        .router()
        .page::<GameDetail>("/games/:id", RouteOptions::new())
        .page::<GameList>("/list", RouteOptions::new().template("games/List:"))
        .page::<GameList>("/list/items", RouteOptions::new().template("games/List:items"))
        .page::<GameList>("/missing", RouteOptions::new().template("nope/Missing"))
        .build();

    assert_eq!(body_text(get(router.clone(), "/games/12").await).await, "Game 12");
    assert_eq!(body_text(get(router.clone(), "/list").await).await, "<ul><li>none</li></ul>");
    assert_eq!(body_text(get(router.clone(), "/list/items").await).await, "<li>none</li>");

    let resp = get(router, "/missing").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(resp).await, "Template render error");
}
