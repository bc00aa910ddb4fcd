use crate::message::model::Message;

/// Fixed GIF attachment used by `/gif`; query only captions it.
pub const GIF_PLACEHOLDER_URL: &str = "https://i.giphy.com/8Zaoyr0zW9NJLiF6Pv.webp";

/// Backend call deferred to the dispatching shell. Its follow-up message is
/// appended whenever the call resolves, with no ordering guarantee against
/// later submitted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    LastSeen { username: String },
    AskAi { question: String },
}

/// Result of dispatching one input line: messages to append in order, at most
/// one deferred effect, and at most one validation notice.
#[derive(Debug, Default)]
pub struct Outcome {
    pub messages: Vec<Message>,
    pub effect: Option<Effect>,
    pub notice: Option<super::Error>,
}

impl Outcome {
    pub fn message(message: Message) -> Self {
        Self {
            messages: vec![message],
            ..Default::default()
        }
    }

    pub fn notice(error: super::Error) -> Self {
        Self {
            notice: Some(error),
            ..Default::default()
        }
    }
}

/// Extracts the video identifier from the known YouTube URL shapes.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

    for marker in MARKERS {
        if let Some(at) = url.find(marker) {
            let rest = &url[at + marker.len()..];
            let end = rest
                .find(['&', '\n', '?', '#'])
                .unwrap_or(rest.len());
            if end > 0 {
                return Some(&rest[..end]);
            }
        }
    }
    None
}
