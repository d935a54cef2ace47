//! Example consumer: a small game catalogue served with pagekit.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! (templates are read from `example_consumer/templates` unless
//! `PAGEKIT_TEMPLATE_DIRS` says otherwise).

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Router};
use pagekit::{
    auth_loader, load_all, loader, App, Auth, AuthProvider, BasePage, BoxError, EntityListing, Filtering,
    FragmentAware, Flow, Htmx, LoadError, LoadResult, PageGroup, PageRequest, Pagination, Profile, ResponseSink,
    RouteOptions, TemplateConfig, View,
};
use pagekit::pages::LoginPage;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize)]
struct Game {
    id: String,
    name: String,
    owner: String,
}

/// Trusts an `x-user` header; stands in for a real session store.
struct HeaderAuth;

#[async_trait]
impl AuthProvider for HeaderAuth {
    async fn logged_in_user_id(&self, req: &PageRequest) -> Option<String> {
        req.header("x-user").map(str::to_string)
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<Profile>, BoxError> {
        let mut profile = Profile::new();
        profile.insert("username".into(), user_id.into());
        Ok(Some(profile))
    }
}

struct Site {
    auth: HeaderAuth,
    games: Vec<Game>,
}

impl Site {
    fn new() -> Self {
        let games = [("1", "Chess", "ada"), ("2", "Go", "lin"), ("3", "Hex", "ada")]
            .into_iter()
            .map(|(id, name, owner)| Game {
                id: id.into(),
                name: name.into(),
                owner: owner.into(),
            })
            .collect();
        Site { auth: HeaderAuth, games }
    }
}

#[derive(Default, Serialize)]
struct HomePage {
    #[serde(flatten)]
    base: BasePage,
    #[serde(flatten)]
    auth: Auth,
    game_count: usize,
}

#[async_trait]
impl View<Site> for HomePage {
    const NAME: &'static str = "HomePage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<Site>) -> LoadResult {
        let mut auth = auth_loader(&mut self.auth, &app.context.auth);
        if load_all(req, res, app, &mut [loader(&mut self.base), loader(&mut auth)]).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
        self.base.title = "Games".into();
        self.game_count = app.context.games.len();
        Ok(Flow::Continue)
    }
}

#[derive(Default, Serialize)]
struct GameListPage {
    #[serde(flatten)]
    base: BasePage,
    #[serde(flatten)]
    pagination: Pagination,
    #[serde(flatten)]
    filtering: Filtering,
    #[serde(flatten)]
    htmx: Htmx,
    listing: Option<EntityListing<Game>>,
}

#[async_trait]
impl View<Site> for GameListPage {
    const NAME: &'static str = "games/GameListPage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<Site>) -> LoadResult {
        let flow = load_all(
            req,
            res,
            app,
            &mut [
                loader(&mut self.base),
                loader(&mut self.pagination),
                loader(&mut self.filtering),
                loader(&mut self.htmx),
            ],
        )
        .await?;
        if flow == Flow::Finished {
            return Ok(flow);
        }

        let needle = self.filtering.query.to_lowercase();
        let matches: Vec<Game> = app
            .context
            .games
            .iter()
            .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let total = matches.len();
        let items: Vec<Game> = matches
            .into_iter()
            .skip(self.pagination.offset())
            .take(self.pagination.page_size)
            .collect();
        self.pagination
            .set_total(total, self.pagination.offset() + items.len() < total);
        self.listing = Some(
            EntityListing::new("Games", "/games")
                .with_htmx("/games")
                .with_filtering(&self.filtering)
                .with_items(items),
        );
        Ok(Flow::Continue)
    }
}

impl FragmentAware for GameListPage {
    fn should_render_fragment(&self) -> bool {
        self.htmx.should_render_fragment()
    }
}

#[derive(Default, Serialize)]
struct GameDetailPage {
    #[serde(flatten)]
    base: BasePage,
    #[serde(flatten)]
    auth: Auth,
    game: Option<Game>,
}

#[async_trait]
impl View<Site> for GameDetailPage {
    const NAME: &'static str = "games/GameDetailPage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<Site>) -> LoadResult {
        let mut auth = auth_loader(&mut self.auth, &app.context.auth);
        if load_all(req, res, app, &mut [loader(&mut self.base), loader(&mut auth)]).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
        let id = req.path_param("id").unwrap_or_default();
        let Some(game) = app.context.games.iter().find(|g| g.id == id) else {
            res.error(StatusCode::NOT_FOUND, format!("game {} not found", id));
            return Err(LoadError::msg(format!("game {} not found", id)).after_finish());
        };
        self.auth.mark_owner(&game.owner);
        self.base.title = game.name.clone();
        self.game = Some(game.clone());
        Ok(Flow::Continue)
    }
}

#[derive(Default)]
struct GamePages;

impl PageGroup<Site> for GamePages {
    fn routes(&self, app: &Arc<App<Site>>) -> Router {
        app.router()
            .adaptive_page::<GameListPage>(
                "GET /",
                "games/GameListPage",
                "games/GameListPage:results",
                RouteOptions::new(),
            )
            .page::<GameDetailPage>("GET /:id", RouteOptions::new())
            .build()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pagekit=info,example_consumer=info")),
        )
        .init();

    let mut config = TemplateConfig::from_env()?;
    if std::env::var_os("PAGEKIT_TEMPLATE_DIRS").is_none() {
        config.dirs = vec![concat!(env!("CARGO_MANIFEST_DIR"), "/templates").into()];
    }
    let app = Arc::new(App::from_config(Site::new(), &config));

    let router = app
        .router()
        .page::<HomePage>("GET /", RouteOptions::new())
        .page::<LoginPage>("GET /login", RouteOptions::new())
        .mount::<GamePages>("/games")
        .handler("/healthz", get(|| async { "ok" }))
        .build();

    let addr = std::env::var("PAGEKIT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
