use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user;

use super::{Id, Kind};

/// Nickname reserved for locally generated notices.
pub const SYSTEM: &str = "System";

/// One entry of the shared (or private) stream. Append-only: never mutated
/// after creation, never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: Id,
    pub nickname: user::Name,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, rename = "type")]
    pub kind: Kind,
    #[serde(default, rename = "embedData", skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
    #[serde(default, rename = "fileData", skip_serializing_if = "Option::is_none")]
    pub file: Option<FileData>,
}

impl Message {
    fn new(nickname: user::Name, content: impl Into<String>, kind: Kind) -> Self {
        Self {
            id: Id::next(),
            nickname,
            content: content.into(),
            timestamp: Utc::now(),
            kind,
            embed: None,
            file: None,
        }
    }

    pub fn plain(nickname: user::Name, content: impl Into<String>) -> Self {
        Self::new(nickname, content, Kind::Message)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(user::Name(SYSTEM.into()), content, Kind::System)
    }

    /// A command marker message; rendering of its content is a view concern.
    pub fn command(tag: impl Into<String>) -> Self {
        Self::new(user::Name(SYSTEM.into()), tag, Kind::Command)
    }

    /// Whispers stay in the shared stream, addressed via an `@username`
    /// prefix and styled distinctly by the view.
    pub fn whisper(from: user::Name, to: &str, text: &str) -> Self {
        Self::new(from, format!("@{to} {text}"), Kind::Whisper)
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn with_file(mut self, file: FileData) -> Self {
        self.file = Some(file);
        self
    }

    pub fn mentions(&self, name: &user::Name) -> bool {
        markup_mentions(&self.content, name.as_str())
    }
}

fn markup_mentions(content: &str, name: &str) -> bool {
    super::markup::scan(content).iter().any(|token| match token {
        super::markup::Token::Mention(mentioned) => *mentioned == name,
        _ => false,
    })
}

/// Structured attachment rendered alongside a message; at most one per
/// message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Embed {
    Youtube {
        #[serde(rename = "videoId")]
        video_id: String,
        title: String,
    },
    Url {
        url: String,
        title: String,
    },
    Gif {
        url: String,
        title: String,
    },
}

/// Uploaded file descriptor as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileData {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
    pub url: String,
}
