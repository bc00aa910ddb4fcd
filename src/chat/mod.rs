use std::sync::Arc;

use crate::{command, integration, user};

pub mod api;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub type AiApi = Arc<dyn api::AiApi + Send + Sync>;
pub type Service = Arc<service::ChatService>;

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("join the room before chatting")]
    NotJoined,
    #[error("user {0:?} not found")]
    UserNotFound(String),
    #[error("no active private chat")]
    NoActiveChat,

    Command(#[from] command::Error),
    _User(#[from] user::Error),
    _Integration(#[from] integration::Error),
}
