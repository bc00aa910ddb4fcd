use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Name;

/// Session-local participant record; one authoritative copy per participant,
/// owned by the room roster and lost on reload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub nickname: Name,
    pub age_group: AgeGroup,
    pub joined_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub roles: Vec<Role>,
    pub previous_nicknames: Vec<String>,
    pub chat_color: String,
    pub avatar: String,
    pub status: Status,
}

impl User {
    pub fn is_bot(&self) -> bool {
        self.roles.contains(&Role::Bot)
    }
}

/// The resident AI participant every room starts with.
pub fn genie() -> User {
    User {
        nickname: Name("Genie".into()),
        age_group: AgeGroup::Adults,
        joined_at: Utc::now() - Duration::days(365),
        last_seen: Utc::now(),
        roles: vec![Role::Bot, Role::AiAssistant],
        previous_nicknames: vec!["ChatGenie".into(), "AIHelper".into()],
        chat_color: "#9333EA".into(),
        avatar: "https://api.dicebear.com/7.x/bottts/svg?seed=Genie&backgroundColor=9333ea".into(),
        status: Status::Online,
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgeGroup {
    #[serde(rename = "teens")]
    Teens,
    #[serde(rename = "young-adults")]
    YoungAdults,
    #[serde(rename = "adults")]
    Adults,
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "teens" => Ok(Self::Teens),
            "young-adults" => Ok(Self::YoungAdults),
            "adults" => Ok(Self::Adults),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Member,
    Admin,
    Moderator,
    Helper,
    Veteran,
    Bot,
    #[serde(rename = "AI Assistant")]
    AiAssistant,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Online,
    Idle,
    Busy,
    Invisible,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Busy => "busy",
            Self::Invisible => "invisible",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Status {
    type Err = super::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "busy" => Ok(Self::Busy),
            "invisible" => Ok(Self::Invisible),
            other => Err(super::Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Session-local friend entry; presence is derived from the roster.
#[derive(Clone, Debug)]
pub struct Friend {
    pub nickname: Name,
    pub last_online: DateTime<Utc>,
    pub presence: Presence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Online,
    Away,
    Offline,
}

impl From<Status> for Presence {
    fn from(status: Status) -> Self {
        match status {
            Status::Online => Self::Online,
            Status::Idle | Status::Busy => Self::Away,
            Status::Invisible => Self::Offline,
        }
    }
}

impl Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSeen {
    pub username: String,
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_online: bool,
}

/// Human-readable distance between two instants, coarsest unit wins.
pub fn time_since(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let minutes = (to - from).num_minutes();
    if minutes < 1 {
        return "just now".into();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}
