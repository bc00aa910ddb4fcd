use std::sync::Arc;

use crate::integration;

pub mod api;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub type Api = Arc<dyn api::AuthApi + Send + Sync>;

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("nickname must be 4 to 20 characters long")]
    InvalidNickname,
    #[error("invalid age group: {0}")]
    InvalidAgeGroup(String),

    _Integration(#[from] integration::Error),
}
