use reqwest::multipart::{Form, Part};

use crate::integration::http::Backend;

use super::model::{Kind, Upload, Uploaded};

#[async_trait::async_trait]
pub trait FileApi {
    async fn upload(&self, upload: &Upload, kind: Kind) -> super::Result<Uploaded>;
}

#[derive(Clone)]
pub struct HttpFileApi {
    backend: Backend,
}

impl HttpFileApi {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl FileApi for HttpFileApi {
    async fn upload(&self, upload: &Upload, kind: Kind) -> super::Result<Uploaded> {
        let part = Part::bytes(upload.payload.to_vec())
            .file_name(upload.filename.clone())
            .mime_str(&upload.mime)
            .map_err(crate::integration::Error::from)?;
        let form = Form::new().part("file", part).text("type", kind.tag());

        Ok(self.backend.post_multipart("/upload", form).await?)
    }
}
