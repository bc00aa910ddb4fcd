use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::{Error, Result};

/// Response convention shared by every backend endpoint: callers must branch
/// on `success` before trusting `data`.
#[derive(serde::Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::Failure(
                self.error.unwrap_or("unknown backend error".into()),
            ));
        }
        self.data.ok_or(Error::MissingData)
    }

    pub fn into_ack(self) -> Result<()> {
        if !self.success {
            return Err(Error::Failure(
                self.error.unwrap_or("unknown backend error".into()),
            ));
        }
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct Backend {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl Backend {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let token = self.token.read().await.clone();
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail.or(body.error))
                .unwrap_or_else(|| status.to_string());
            return Err(Error::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.get(self.url(path)?)).await?;
        response.json::<Envelope<T>>().await?.into_data()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.post(self.url(path)?).json(body))
            .await?;
        response.json::<Envelope<T>>().await?.into_data()
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.post(self.url(path)?)).await?;
        response.json::<Envelope<T>>().await?.into_data()
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self
            .send(self.http.post(self.url(path)?).multipart(form))
            .await?;
        response.json::<Envelope<T>>().await?.into_data()
    }

    pub async fn put_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.send(self.http.put(self.url(path)?).json(body)).await?;
        response.json::<Envelope<serde_json::Value>>().await?.into_ack()
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.patch(self.url(path)?).json(body))
            .await?;
        response.json::<Envelope<T>>().await?.into_data()
    }

    // DELETE endpoints reply with a bare status or an envelope without data.
    pub async fn delete_ack(&self, path: &str) -> Result<()> {
        let response = self.send(self.http.delete(self.url(path)?)).await?;
        match response.json::<Envelope<serde_json::Value>>().await {
            Ok(envelope) => envelope.into_ack(),
            Err(_) => Ok(()),
        }
    }
}
