use serde::Serialize;

use crate::integration::http::Backend;

use super::Id;
use super::model::{Metadata, Thread};

#[derive(Serialize)]
struct MetadataPatch<'a> {
    metadata: &'a Metadata,
}

#[async_trait::async_trait]
pub trait ThreadApi {
    async fn list(&self) -> super::Result<Vec<Thread>>;

    async fn copy(&self, id: &Id) -> super::Result<Thread>;

    async fn update_metadata(&self, id: &Id, metadata: &Metadata) -> super::Result<Thread>;

    async fn delete(&self, id: &Id) -> super::Result<()>;
}

#[derive(Clone)]
pub struct HttpThreadApi {
    backend: Backend,
}

impl HttpThreadApi {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl ThreadApi for HttpThreadApi {
    async fn list(&self) -> super::Result<Vec<Thread>> {
        Ok(self.backend.get("/threads").await?)
    }

    async fn copy(&self, id: &Id) -> super::Result<Thread> {
        Ok(self.backend.post_empty(&format!("/threads/{id}/copy")).await?)
    }

    async fn update_metadata(&self, id: &Id, metadata: &Metadata) -> super::Result<Thread> {
        Ok(self
            .backend
            .patch(&format!("/threads/{id}"), &MetadataPatch { metadata })
            .await?)
    }

    async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.backend.delete_ack(&format!("/threads/{id}")).await?)
    }
}
