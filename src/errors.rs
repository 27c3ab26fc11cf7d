use thiserror::Error;

use crate::state::command::Method;

/// Business-rule failures. The `Display` text is what clients see in the
/// `error` field of a reply.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvError {
    #[error("not found")]
    NotFound,

    #[error("value too long")]
    ValueTooLong,

    #[error("key too long or empty")]
    InvalidKey,

    #[error("storage is full. maximum size {} keys", crate::services::check::MAX_KEYS)]
    StorageFull,

    #[error("method not allowed. allowed methods is: {}", Method::allowed())]
    MethodNotAllowed,
}

/// Failures at the HTTP boundary, before a command reaches the store.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("something went wrong")]
    Body(#[source] axum::extract::rejection::BytesRejection),

    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
