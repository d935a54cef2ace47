use crate::app::App;
use crate::error::BoxError;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{Flow, LoadResult, Loader};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

/// User profile fields as returned by an [`AuthProvider`].
pub type Profile = Map<String, Value>;

/// Whatever the application uses for sessions and user lookup.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current user id, or `None` (or empty) when nobody is logged in.
    async fn logged_in_user_id(&self, req: &PageRequest) -> Option<String>;

    /// Profile fields for `user_id`; `username` is read from it.
    async fn user_profile(&self, user_id: &str) -> Result<Option<Profile>, BoxError>;
}

/// Logged-in user info. Populated by [`Auth::load_with`] or [`auth_loader`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct Auth {
    pub logged_in_user_id: String,
    pub username: String,
    pub is_logged_in: bool,
    /// Set by the page once it knows who owns the entity being shown.
    pub is_owner: bool,
}

/// No-op: auth needs a provider, see [`auth_loader`].
#[async_trait]
impl<C> Loader<C> for Auth
where
    C: Send + Sync + 'static,
{
    async fn load(&mut self, _req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        Ok(Flow::Continue)
    }
}

impl Auth {
    /// Never fails: an anonymous visitor or a missing profile just leaves the
    /// fields empty.
    pub async fn load_with<P>(&mut self, req: &PageRequest, provider: &P) -> LoadResult
    where
        P: AuthProvider + ?Sized,
    {
        self.logged_in_user_id = provider.logged_in_user_id(req).await.unwrap_or_default();
        self.is_logged_in = !self.logged_in_user_id.is_empty();
        if !self.is_logged_in {
            return Ok(Flow::Continue);
        }
        match provider.user_profile(&self.logged_in_user_id).await {
            Ok(Some(profile)) => {
                if let Some(Value::String(name)) = profile.get("username") {
                    self.username = name.clone();
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("profile lookup for user {} failed: {}", self.logged_in_user_id, e),
        }
        Ok(Flow::Continue)
    }

    pub fn mark_owner(&mut self, owner_id: &str) -> bool {
        self.is_owner = self.is_logged_in && self.logged_in_user_id == owner_id;
        self.is_owner
    }
}

/// [`Auth`] bound to a provider, for use in a loader chain.
pub struct AuthLoader<'a, P: ?Sized> {
    auth: &'a mut Auth,
    provider: &'a P,
}

pub fn auth_loader<'a, P>(auth: &'a mut Auth, provider: &'a P) -> AuthLoader<'a, P>
where
    P: AuthProvider + ?Sized,
{
    AuthLoader { auth, provider }
}

#[async_trait]
impl<'a, C, P> Loader<C> for AuthLoader<'a, P>
where
    C: Send + Sync + 'static,
    P: AuthProvider + ?Sized,
{
    async fn load(&mut self, req: &PageRequest, _res: &mut ResponseSink, _app: &App<C>) -> LoadResult {
        self.auth.load_with(req, self.provider).await
    }
}
