use log::debug;
use tokio::sync::RwLock;

use super::Name;
use super::model::{self, Friend, Status, User};

const MENTION_LIMIT: usize = 5;

/// Room roster plus the session-local friends list. One instance per room
/// view; state is whole-or-partial replaced on each event, never partially
/// visible.
pub struct UserService {
    api: super::Api,
    users: RwLock<Vec<User>>,
    friends: RwLock<Vec<Friend>>,
}

impl UserService {
    pub fn new(api: super::Api) -> Self {
        Self {
            api,
            users: RwLock::new(vec![model::genie()]),
            friends: RwLock::new(Vec::new()),
        }
    }

    pub async fn roster(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn friends(&self) -> Vec<Friend> {
        self.friends.read().await.clone()
    }

    pub async fn find(&self, name: &Name) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.nickname == name)
            .cloned()
    }

    /// Adds a participant to the roster, or refreshes their entry if the
    /// nickname is already present.
    pub async fn join(&self, user: User) {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.nickname == user.nickname) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
    }

    pub async fn set_status(&self, name: &Name, status: Status) {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| &u.nickname == name) {
            user.status = status;
        }
    }

    /// Replaces the roster from the backend listing; the resident bot is
    /// re-added when the listing omits it.
    pub async fn refresh(&self) -> super::Result<usize> {
        let mut listed = self.api.list().await?;
        if !listed.iter().any(|u| u.is_bot()) {
            listed.push(model::genie());
        }

        let count = listed.len();
        *self.users.write().await = listed;
        self.sync_friend_presence().await;
        debug!("roster refreshed, {count} members");
        Ok(count)
    }

    /// Refreshes friend presence from the users listing and reports the
    /// actual outcome.
    pub async fn refresh_friends(&self) -> super::Result<usize> {
        self.api.list().await.map(|_| ())?;
        self.sync_friend_presence().await;
        Ok(self.friends.read().await.len())
    }

    /// Returns true when the friendship was added, false when it already
    /// existed.
    pub async fn befriend(&self, name: &Name) -> bool {
        // Locks are taken users-then-friends everywhere.
        let seen = self
            .users
            .read()
            .await
            .iter()
            .find(|u| &u.nickname == name)
            .map(|u| (u.last_seen, u.status));

        let mut friends = self.friends.write().await;
        if friends.iter().any(|f| &f.nickname == name) {
            return false;
        }

        let (last_online, presence) = match seen {
            Some((last_seen, status)) => (last_seen, status.into()),
            None => (chrono::Utc::now(), model::Presence::Offline),
        };
        friends.push(Friend {
            nickname: name.clone(),
            last_online,
            presence,
        });
        true
    }

    pub async fn unfriend(&self, name: &Name) -> bool {
        let mut friends = self.friends.write().await;
        let before = friends.len();
        friends.retain(|f| &f.nickname != name);
        friends.len() != before
    }

    pub async fn is_friend(&self, name: &Name) -> bool {
        self.friends.read().await.iter().any(|f| &f.nickname == name)
    }

    /// Case-insensitive substring match over the roster, excluding the caller;
    /// at most five candidates, roster order.
    pub async fn mention_candidates(&self, query: &str, exclude: &Name) -> Vec<User> {
        let query = query.to_lowercase();
        self.users
            .read()
            .await
            .iter()
            .filter(|u| &u.nickname != exclude)
            .filter(|u| u.nickname.as_str().to_lowercase().contains(&query))
            .take(MENTION_LIMIT)
            .cloned()
            .collect()
    }

    async fn sync_friend_presence(&self) {
        let users = self.users.read().await;
        let mut friends = self.friends.write().await;
        for friend in friends.iter_mut() {
            match users.iter().find(|u| u.nickname == friend.nickname) {
                Some(user) => {
                    friend.last_online = user.last_seen;
                    friend.presence = user.status.into();
                }
                None => friend.presence = model::Presence::Offline,
            }
        }
    }
}
