//! Files and folders inside a storage.

use crate::error::{OsfError, Result};
use crate::http::Transport;
use crate::models::wire;
use crate::models::{require_attr, Container};
use crate::paths::norm_remote_path;
use crate::transfer;
use serde_json::Value;
use std::io::Write;

/// A remote file. Immutable once constructed; all remote interaction
/// goes through an explicitly passed transport.
#[derive(Debug, Clone)]
pub struct File {
    pub id: String,
    pub name: String,
    /// Normalized human-readable path within the storage.
    pub path: String,
    pub size: Option<u64>,
    pub provider: Option<String>,
    pub date_modified: Option<String>,
    pub extra: Option<Value>,
    download_url: Option<String>,
    delete_url: Option<String>,
}

impl File {
    pub(crate) fn from_resource(resource: wire::Resource) -> Result<Self> {
        let id = resource.id;
        let name = require_attr(resource.attributes.name, &id, "name")?;
        let raw_path = resource
            .attributes
            .materialized_path
            .or(resource.attributes.path);
        let path = norm_remote_path(&require_attr(raw_path, &id, "path")?);
        Ok(Self {
            id,
            name,
            path,
            size: resource.attributes.size,
            provider: resource.attributes.provider,
            date_modified: resource.attributes.date_modified,
            extra: resource.attributes.extra,
            download_url: resource.links.download,
            delete_url: resource.links.delete,
        })
    }

    /// Stream the file's content into `sink` without buffering it in
    /// memory. Returns the number of bytes written.
    pub fn write_to<T: Transport, W: Write + ?Sized>(
        &self,
        transport: &T,
        sink: &mut W,
    ) -> Result<u64> {
        let url = self.link(self.download_url.as_deref(), "download")?;
        transfer::download(transport, url, sink)
    }

    /// Delete the file on the remote service. Succeeds if the file is
    /// already gone.
    pub fn remove<T: Transport>(&self, transport: &T) -> Result<()> {
        let url = self.link(self.delete_url.as_deref(), "delete")?;
        transfer::delete(transport, url)
    }

    fn link<'a>(&self, link: Option<&'a str>, name: &'static str) -> Result<&'a str> {
        link.ok_or_else(|| OsfError::MissingLink {
            id: self.id.clone(),
            link: name,
        })
    }
}

/// A remote folder. Containment operations come from [`Container`].
#[derive(Debug, Clone)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Normalized human-readable path within the storage.
    pub path: String,
    files_url: Option<String>,
    new_folder_url: Option<String>,
    upload_url: Option<String>,
}

impl Folder {
    pub(crate) fn from_resource(resource: wire::Resource) -> Result<Self> {
        let files_url = resource.files_link().map(str::to_owned);
        let id = resource.id;
        let name = require_attr(resource.attributes.name, &id, "name")?;
        let raw_path = resource
            .attributes
            .materialized_path
            .or(resource.attributes.path);
        let path = norm_remote_path(&require_attr(raw_path, &id, "path")?);
        Ok(Self {
            id,
            name,
            path,
            files_url,
            new_folder_url: resource.links.new_folder,
            upload_url: resource.links.upload,
        })
    }
}

impl Container for Folder {
    fn container_id(&self) -> &str {
        &self.id
    }

    fn files_url(&self) -> Result<&str> {
        self.require_link(self.files_url.as_deref(), "files")
    }

    fn new_folder_url(&self) -> Result<&str> {
        self.require_link(self.new_folder_url.as_deref(), "new_folder")
    }

    fn new_file_url(&self) -> Result<&str> {
        self.require_link(self.upload_url.as_deref(), "upload")
    }
}

/// A file or folder yielded by a tree walk.
#[derive(Debug, Clone)]
pub enum Node {
    File(File),
    Folder(Folder),
}

impl Node {
    /// Classify a wire resource by its `kind` attribute and convert it,
    /// enforcing the fields that kind requires.
    pub fn from_resource(resource: wire::Resource) -> Result<Self> {
        let kind = resource.attributes.kind.clone().ok_or_else(|| {
            OsfError::MissingAttribute {
                id: resource.id.clone(),
                attr: "kind",
            }
        })?;
        match kind.as_str() {
            "file" => Ok(Node::File(File::from_resource(resource)?)),
            "folder" => Ok(Node::Folder(Folder::from_resource(resource)?)),
            _ => Err(OsfError::UnsupportedKind {
                id: resource.id,
                kind,
            }),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::File(file) => &file.path,
            Node::Folder(folder) => &folder.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Folder(folder) => &folder.name,
        }
    }
}
