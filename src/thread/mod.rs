use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;

pub mod api;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub type Api = Arc<dyn api::ThreadApi + Send + Sync>;
pub type Service = Arc<service::ThreadList>;

/// Opaque server-assigned identifier; the client never fabricates one.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Id(pub String);

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("thread not found: {0}")]
    NotFound(Id),
    /// The duplicate exists server-side but carries no fork metadata; it is
    /// left for manual correction and shows up untagged on the next load.
    #[error("thread {fork} was duplicated but could not be tagged as a fork of {parent}")]
    ForkNotTagged {
        fork: Id,
        parent: Id,
        #[source]
        source: Box<Error>,
    },

    _Integration(#[from] integration::Error),
}
