use std::sync::Arc;

use crate::integration;

pub mod api;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub type Api = Arc<dyn api::FileApi + Send + Sync>;

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("nothing to upload: {0} is empty")]
    Empty(String),

    _Io(#[from] std::io::Error),
    _Integration(#[from] integration::Error),
}
