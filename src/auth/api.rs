use crate::integration::http::Backend;

use super::model::{Credentials, Session};

#[async_trait::async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> super::Result<Session>;
}

#[derive(Clone)]
pub struct HttpAuthApi {
    backend: Backend,
}

impl HttpAuthApi {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> super::Result<Session> {
        Ok(self.backend.post("/login", credentials).await?)
    }
}
