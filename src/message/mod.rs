use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub mod markup;
pub mod model;

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Client-generated, time-based identifier; unique within a session, not
/// globally.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Id(pub String);

impl Id {
    pub fn next() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{millis}-{seq}"))
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Message,
    System,
    Command,
    Whisper,
}

#[cfg(test)]
mod tests {
    use super::Id;

    #[test]
    fn ids_are_unique_within_a_session() {
        let a = Id::next();
        let b = Id::next();
        assert_ne!(a, b);
    }
}
