use serde::{Deserialize, Serialize};

use crate::integration::http::Backend;

#[derive(Serialize)]
struct Question<'a> {
    question: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Answer {
    pub response: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[async_trait::async_trait]
pub trait AiApi {
    async fn ask(&self, question: &str) -> super::Result<Answer>;
}

#[derive(Clone)]
pub struct HttpAiApi {
    backend: Backend,
}

impl HttpAiApi {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl AiApi for HttpAiApi {
    async fn ask(&self, question: &str) -> super::Result<Answer> {
        Ok(self.backend.post("/ai/ask", &Question { question }).await?)
    }
}
