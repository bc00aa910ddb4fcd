use std::collections::HashMap;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::RwLock;

use crate::command::model::{Effect, Outcome};
use crate::command::service::dispatch;
use crate::files::model::Kind;
use crate::message::markup;
use crate::message::model::{Embed, FileData, Message};
use crate::user::model::{Status, User, time_since};
use crate::user::{self, Name};

use super::Error;
use super::model::PrivateChat;

/// Owns the shared stream, the private chats and the caller's identity.
/// Everything runs on discrete events; effects of slash commands are executed
/// here, after their synchronous messages have been appended.
pub struct ChatService {
    ai: super::AiApi,
    user_api: user::Api,
    users: user::Service,
    me: RwLock<Option<User>>,
    messages: RwLock<Vec<Message>>,
    private: RwLock<HashMap<Name, PrivateChat>>,
    active_private: RwLock<Option<Name>>,
}

impl ChatService {
    pub fn new(ai: super::AiApi, user_api: user::Api, users: user::Service) -> Self {
        Self {
            ai,
            user_api,
            users,
            me: RwLock::new(None),
            messages: RwLock::new(Vec::new()),
            private: RwLock::new(HashMap::new()),
            active_private: RwLock::new(None),
        }
    }

    pub async fn me(&self) -> super::Result<User> {
        self.me.read().await.clone().ok_or(Error::NotJoined)
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn roster(&self) -> Vec<User> {
        self.users.roster().await
    }

    /// First join appends the system notice exactly once; a repeated join for
    /// the same nickname only refreshes the roster entry.
    pub async fn join(&self, user: User) {
        let already = self.me.read().await.is_some();
        self.users.join(user.clone()).await;

        if !already {
            self.append(Message::system(format!(
                "{} joined the conversation",
                user.nickname
            )))
            .await;
            *self.me.write().await = Some(user);
        }
    }

    /// Interprets one submitted line. Synchronous messages land in dispatch
    /// order; the deferred effect appends its follow-up whenever the backend
    /// call resolves.
    pub async fn submit(&self, line: &str) -> super::Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let me = self.me().await?;

        let Outcome {
            messages,
            effect,
            notice,
        } = dispatch(&me, line);
        for message in messages {
            self.append(message).await;
        }
        if let Some(notice) = notice {
            return Err(notice.into());
        }
        if let Some(effect) = effect {
            self.run_effect(&me, effect).await?;
        }
        Ok(())
    }

    async fn run_effect(&self, me: &User, effect: Effect) -> super::Result<()> {
        match effect {
            Effect::LastSeen { username } => match self.user_api.last_seen(&username).await {
                Ok(seen) => {
                    let when = match seen.last_seen {
                        Some(at) => time_since(at, Utc::now()),
                        None => "just now".into(),
                    };
                    self.append(Message::system(format!(
                        "{} was last seen {when}",
                        seen.username
                    )))
                    .await;
                    Ok(())
                }
                Err(user::Error::NotFound(name)) => Err(Error::UserNotFound(name)),
                Err(other) => Err(other.into()),
            },
            Effect::AskAi { question } => {
                // The question message is already in the stream and is never
                // retracted, even when the call fails.
                let answer = self.ai.ask(&question).await?;
                self.append(Message::plain(
                    Name("Genie".into()),
                    format!("@{} {}", me.nickname, answer.response),
                ))
                .await;
                Ok(())
            }
        }
    }

    pub async fn set_status(&self, status: Status) -> super::Result<()> {
        let me = self.me().await?;
        self.user_api
            .update_status(status)
            .await
            .map_err(Error::from)?;

        self.users.set_status(&me.nickname, status).await;
        if let Some(me) = self.me.write().await.as_mut() {
            me.status = status;
        }
        info!("status changed to {status}");
        Ok(())
    }

    pub async fn refresh_members(&self) -> super::Result<usize> {
        Ok(self.users.refresh().await?)
    }

    pub async fn refresh_friends(&self) -> super::Result<usize> {
        Ok(self.users.refresh_friends().await?)
    }

    /// Candidates for the `@` dropdown given the input before the cursor.
    pub async fn mention_candidates(&self, before_cursor: &str) -> Vec<User> {
        let Some(query) = markup::mention_query(before_cursor) else {
            return Vec::new();
        };
        let Ok(me) = self.me().await else {
            return Vec::new();
        };
        self.users.mention_candidates(query, &me.nickname).await
    }

    // private chats

    pub async fn open_private(&self, with: &Name) -> super::Result<PrivateChat> {
        self.me().await?;
        *self.active_private.write().await = Some(with.clone());

        let mut private = self.private.write().await;
        let chat = private
            .entry(with.clone())
            .or_insert_with(|| PrivateChat::new(with.clone()));
        chat.unread_count = 0;
        Ok(chat.clone())
    }

    pub async fn close_private(&self) {
        *self.active_private.write().await = None;
    }

    pub async fn active_private(&self) -> Option<Name> {
        self.active_private.read().await.clone()
    }

    pub async fn send_private(&self, content: &str) -> super::Result<Message> {
        let me = self.me().await?;
        let with = self
            .active_private
            .read()
            .await
            .clone()
            .ok_or(Error::NoActiveChat)?;

        let message = Message::plain(me.nickname, content);
        let mut private = self.private.write().await;
        let chat = private
            .entry(with.clone())
            .or_insert_with(|| PrivateChat::new(with.clone()));
        chat.messages.push(message.clone());
        Ok(message)
    }

    /// Incoming private message; counted as unread unless that chat is open.
    pub async fn record_incoming_private(&self, from: &Name, content: &str) {
        let active = self.active_private.read().await.clone();
        let mut private = self.private.write().await;
        let chat = private
            .entry(from.clone())
            .or_insert_with(|| PrivateChat::new(from.clone()));
        chat.messages.push(Message::plain(from.clone(), content));
        if active.as_ref() != Some(from) {
            chat.unread_count += 1;
        }
    }

    pub async fn unread_count(&self, with: &Name) -> u32 {
        self.private
            .read()
            .await
            .get(with)
            .map(|chat| chat.unread_count)
            .unwrap_or(0)
    }

    // attachments

    /// Appends the announcement for a completed upload.
    pub async fn share_file(&self, kind: Kind, file: FileData) -> super::Result<Message> {
        let me = self.me().await?;
        let what = match kind {
            Kind::Image => "an image",
            Kind::Video => "a video",
            Kind::File => "a file",
        };
        let message = Message::plain(me.nickname, format!("Shared {what}: {}", file.name))
            .with_file(file);
        self.append(message.clone()).await;
        Ok(message)
    }

    /// Embeds a pasted link; YouTube URLs turn into video embeds.
    pub async fn share_link(&self, url: &str) -> super::Result<Message> {
        let me = self.me().await?;
        let message = match crate::command::model::extract_youtube_id(url) {
            Some(video_id) => Message::plain(me.nickname, "Shared a YouTube video").with_embed(
                Embed::Youtube {
                    video_id: video_id.to_string(),
                    title: "YouTube Video".into(),
                },
            ),
            None => {
                Message::plain(me.nickname, format!("Shared a link: {url}")).with_embed(Embed::Url {
                    url: url.to_string(),
                    title: "Shared Link".into(),
                })
            }
        };
        self.append(message.clone()).await;
        Ok(message)
    }

    // moderation affordances; local effects only

    pub async fn befriend(&self, name: &Name) -> super::Result<bool> {
        self.me().await?;
        if !self.users.befriend(name).await {
            return Ok(false);
        }
        self.append(Message::system(format!("You are now friends with {name}")))
            .await;
        Ok(true)
    }

    pub async fn unfriend(&self, name: &Name) -> super::Result<bool> {
        self.me().await?;
        if !self.users.unfriend(name).await {
            return Ok(false);
        }
        self.append(Message::system(format!(
            "You are no longer friends with {name}"
        )))
        .await;
        Ok(true)
    }

    pub fn mute(&self, name: &Name) -> String {
        warn!("muted {name}");
        format!("You muted {name}")
    }

    pub fn block(&self, name: &Name) -> String {
        warn!("blocked {name}");
        format!("You blocked {name}")
    }

    pub async fn kick(&self, name: &Name) {
        self.append(Message::system(format!("{name} was kicked from the channel")))
            .await;
    }

    pub async fn ban(&self, name: &Name) {
        self.append(Message::system(format!("{name} was banned from the channel")))
            .await;
    }

    async fn append(&self, message: Message) {
        self.messages.write().await.push(message);
    }
}
