use std::sync::Arc;

use crate::auth::api::HttpAuthApi;
use crate::auth::service::AuthService;
use crate::chat::api::HttpAiApi;
use crate::chat::service::ChatService;
use crate::files::api::HttpFileApi;
use crate::files::service::UploadService;
use crate::integration::Config;
use crate::integration::http::Backend;
use crate::thread::api::HttpThreadApi;
use crate::thread::service::ThreadList;
use crate::user::api::HttpUserApi;
use crate::user::model::User;
use crate::user::service::UserService;
use crate::{auth, chat, files, thread, user};

/// Explicit state containers owned by one top-level controller and passed
/// down by handle; no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub auth: AuthService,
    pub chat: chat::Service,
    pub threads: thread::Service,
    pub users: user::Service,
    pub files: Arc<UploadService>,
}

impl AppState {
    pub fn init(config: &Config, http: reqwest::Client) -> Self {
        let backend = Backend::new(http, config.api_url.clone());

        let auth_api: auth::Api = Arc::new(HttpAuthApi::new(backend.clone()));
        let user_api: user::Api = Arc::new(HttpUserApi::new(backend.clone()));
        let ai_api: chat::AiApi = Arc::new(HttpAiApi::new(backend.clone()));
        let thread_api: thread::Api = Arc::new(HttpThreadApi::new(backend.clone()));
        let file_api: files::Api = Arc::new(HttpFileApi::new(backend.clone()));

        let users: user::Service = Arc::new(UserService::new(user_api.clone()));

        Self {
            auth: AuthService::new(auth_api),
            chat: Arc::new(ChatService::new(ai_api, user_api, users.clone())),
            threads: Arc::new(ThreadList::new(thread_api)),
            users,
            files: Arc::new(UploadService::new(file_api)),
            backend,
        }
    }

    /// Validates, logs in, stores the bearer token and enters the room.
    pub async fn login(&self, nickname: &str, age_group: &str) -> Result<User, auth::Error> {
        let session = self.auth.login(nickname, age_group).await?;
        self.backend.set_token(session.token).await;
        self.chat.join(session.user.clone()).await;
        Ok(session.user)
    }
}
