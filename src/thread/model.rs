use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Server-tracked conversation record, possibly forked from another thread.
/// Only `metadata` is ever written by the client, via partial PATCH.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "thread_id")]
    pub id: Id,
    #[serde(default)]
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub values: Option<Values>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Thread {
    pub fn is_pinned(&self) -> bool {
        self.metadata.is_pinned.unwrap_or(false)
    }

    pub fn is_fork(&self) -> bool {
        self.metadata.is_fork.unwrap_or(false)
    }

    /// Preview string for the list entry: the first message's content when
    /// present, the id otherwise.
    pub fn preview(&self) -> String {
        self.values
            .as_ref()
            .and_then(|values| values.messages.first())
            .map(|message| message.content_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Set by the backend, read-only to the client.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Busy,
    Error,
    Interrupted,
}

/// The slice of the thread payload the client actually reads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Values {
    #[serde(default)]
    pub messages: Vec<ValueMessage>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValueMessage {
    pub content: serde_json::Value,
}

impl ValueMessage {
    /// Message content arrives either as a string or as a list of typed
    /// parts whose `text` fields are concatenated.
    pub fn content_string(&self) -> String {
        match &self.content {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Array(parts) => parts
                .iter()
                .filter_map(|part| part.get("text"))
                .filter_map(|text| text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        }
    }
}

/// Client-writable annotations; every field optional so a PATCH stays
/// partial.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fork: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_thread_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
