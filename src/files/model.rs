use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Upload type tag the backend validates against the payload's mime type.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Image,
    Video,
    File,
}

impl Kind {
    pub fn infer(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::File
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

/// Outgoing payload; held in memory, uploads are neither resumable nor
/// cancelable once issued.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub mime: String,
    pub payload: Bytes,
}

/// Descriptor returned by the backend for a stored file.
#[derive(Clone, Debug, Deserialize)]
pub struct Uploaded {
    pub url: String,
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
}

impl From<Uploaded> for crate::message::model::FileData {
    fn from(uploaded: Uploaded) -> Self {
        Self {
            name: uploaded.filename,
            size: uploaded.size,
            mime: uploaded.mime,
            url: uploaded.url,
        }
    }
}
