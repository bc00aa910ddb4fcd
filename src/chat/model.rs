use crate::message::model::Message;
use crate::user::Name;

/// Side conversation with one peer; created lazily on first interaction and
/// kept for the rest of the session.
#[derive(Clone, Debug)]
pub struct PrivateChat {
    pub with_user: Name,
    pub messages: Vec<Message>,
    pub unread_count: u32,
}

impl PrivateChat {
    pub fn new(with_user: Name) -> Self {
        Self {
            with_user,
            messages: Vec::new(),
            unread_count: 0,
        }
    }
}
