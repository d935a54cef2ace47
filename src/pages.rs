//! Ready-made login, registration and profile pages. Embed them in an app's
//! own page structs or register them directly.

use crate::app::App;
use crate::request::PageRequest;
use crate::response::ResponseSink;
use crate::view::{loader, load_all, Flow, LoadResult, View};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::mixins::{BasePage, Profile};

/// Which sign-in methods the login page offers.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LoginConfig {
    pub enable_email_login: bool,
    pub enable_google_login: bool,
    pub enable_github_login: bool,
    pub enable_microsoft_login: bool,
    pub enable_apple_login: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct LoginPage {
    #[serde(flatten)]
    pub base: BasePage,
    pub callback_url: String,
    pub csrf_token: String,
    pub config: LoginConfig,
}

#[async_trait]
impl<C> View<C> for LoginPage
where
    C: Send + Sync + 'static,
{
    const NAME: &'static str = "LoginPage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult {
        if load_all(req, res, app, &mut [loader(&mut self.base)]).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
        self.base.disable_splash_screen = true;
        self.callback_url = req.query_or("callbackURL", "");
        Ok(Flow::Continue)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RegisterPage {
    #[serde(flatten)]
    pub base: BasePage,
    pub callback_url: String,
    pub csrf_token: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub verify_password: String,
    /// Field name -> message.
    pub errors: BTreeMap<String, String>,
}

#[async_trait]
impl<C> View<C> for RegisterPage
where
    C: Send + Sync + 'static,
{
    const NAME: &'static str = "RegisterPage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult {
        if load_all(req, res, app, &mut [loader(&mut self.base)]).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
        self.callback_url = req.query_or("callbackURL", "");
        Ok(Flow::Continue)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfilePage {
    #[serde(flatten)]
    pub base: BasePage,
    pub user_id: String,
    pub email: String,
    pub email_verified: bool,
    pub username: String,
    pub profile: Profile,
    pub verification_sent: bool,
    pub verification_error: String,
}

#[async_trait]
impl<C> View<C> for ProfilePage
where
    C: Send + Sync + 'static,
{
    const NAME: &'static str = "ProfilePage";

    async fn load(&mut self, req: &PageRequest, res: &mut ResponseSink, app: &App<C>) -> LoadResult {
        if load_all(req, res, app, &mut [loader(&mut self.base)]).await? == Flow::Finished {
            return Ok(Flow::Finished);
        }
        self.base.title = "Profile".to_string();
        self.base.active_tab = "profile".to_string();
        self.base.disable_splash_screen = true;
        self.verification_sent = req.query("verification_sent") == Some("true");
        self.verification_error = req.query_or("verification_error", "");
        Ok(Flow::Continue)
    }
}
