use serde::{Deserialize, Serialize};

use crate::integration::http::Backend;

use super::model::{LastSeen, Status, User};

#[async_trait::async_trait]
pub trait UserApi {
    async fn list(&self) -> super::Result<Vec<User>>;

    async fn last_seen(&self, username: &str) -> super::Result<LastSeen>;

    async fn update_status(&self, status: Status) -> super::Result<()>;
}

#[derive(Clone)]
pub struct HttpUserApi {
    backend: Backend,
}

impl HttpUserApi {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[derive(Deserialize)]
struct UsersData {
    users: Vec<User>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: Status,
}

#[async_trait::async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self) -> super::Result<Vec<User>> {
        let data: UsersData = self.backend.get("/users").await?;
        Ok(data.users)
    }

    async fn last_seen(&self, username: &str) -> super::Result<LastSeen> {
        self.backend
            .get(&format!("/users/{username}/lastseen"))
            .await
            .map_err(|e| match e {
                crate::integration::Error::Rejected { status: 404, .. } => {
                    super::Error::NotFound(username.to_string())
                }
                other => other.into(),
            })
    }

    async fn update_status(&self, status: Status) -> super::Result<()> {
        self.backend
            .put_ack("/users/status", &StatusUpdate { status })
            .await?;
        Ok(())
    }
}
