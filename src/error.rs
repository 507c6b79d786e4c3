//! Error types for the osfcli library.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for OSF operations.
#[derive(Error, Debug)]
pub enum OsfError {
    /// A read request (page fetch, download) returned a non-success status.
    #[error("request to {url} returned status {status}")]
    Response { url: String, status: StatusCode },

    /// A write request (upload, folder creation, delete) returned a
    /// non-success status other than a conflict.
    #[error("write to {url} returned status {status}")]
    RemoteWrite { url: String, status: StatusCode },

    /// The remote service reported 409 Conflict for a file creation.
    #[error("remote file already exists at {0}")]
    FileAlreadyExists(String),

    /// A write operation was attempted without a username and password.
    #[error("a username and password are required for write operations")]
    MissingCredentials,

    /// The local destination of a download already exists.
    #[error("local file {} already exists, not overwriting", .0.display())]
    LocalConflict(PathBuf),

    /// A remote path that should name a file does not.
    #[error("remote path '{0}' does not name a file")]
    InvalidPath(String),

    /// The project has no storage with the requested provider name.
    #[error("project has no storage provider '{0}'")]
    NoSuchStorage(String),

    /// A resource is missing an attribute required for its kind.
    #[error("resource '{id}' is missing required attribute '{attr}'")]
    MissingAttribute { id: String, attr: &'static str },

    /// A resource reports a kind this client does not handle.
    #[error("resource '{id}' has unsupported kind '{kind}'")]
    UnsupportedKind { id: String, kind: String },

    /// A resource does not carry the navigational link an operation needs.
    #[error("resource '{id}' carries no '{link}' link")]
    MissingLink { id: String, link: &'static str },

    /// A folder creation reported a conflict but the folder could not be
    /// found in the parent listing afterwards.
    #[error("folder '{0}' reported as existing but was not found in its parent")]
    MissingFolder(String),

    /// A listing followed more pages than the configured bound allows.
    /// Guards against a misbehaving service producing cyclic 'next' links.
    #[error("listing exceeded the limit of {0} pages")]
    PageLimitExceeded(usize),

    /// Network-level request error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for OSF operations.
pub type Result<T> = std::result::Result<T, OsfError>;
