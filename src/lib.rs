//! Client library for OSF-style remote file storage.
//!
//! A project owns storage providers; each storage is a tree of folders
//! and files reached through paginated listing links. The crate exposes
//! the pieces the `osf` binary is built from: a typed resource model,
//! a lazy page-at-a-time tree walker, a folder-chain resolver and
//! streaming up/downloads, all running over an injectable [`Transport`].
//!
//! [`Transport`]: http::Transport

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod paths;
pub mod transfer;
pub mod walk;

pub use client::Osf;
pub use config::Config;
pub use error::{OsfError, Result};
pub use http::{
    Credentials, HttpTransport, RequestBody, Transport, TransportRequest, TransportResponse,
};
pub use models::{Container, File, Folder, Node, Project, Storage};
pub use walk::{fetch_page, NodeFilter, Page, Walk};
