pub mod model;
pub mod service;

/// Validation failures caught before any network call; surfaced as transient
/// notices, never appended to the stream.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Usage: {0}")]
    Usage(&'static str),
}
