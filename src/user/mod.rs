use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;

pub mod api;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub type Api = Arc<dyn api::UserApi + Send + Sync>;
pub type Service = Arc<service::UserService>;

/// Display name of a participant; unique within the room but never enforced
/// client-side.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Name, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Name(s))
    }
}

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    _Integration(#[from] integration::Error),
}
