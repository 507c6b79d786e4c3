//! Storage providers attached to a project.

use crate::error::Result;
use crate::models::wire;
use crate::models::{require_attr, Container};

/// One storage provider of a project (osfstorage, github, s3, ...).
/// It is the root container of a file tree; everything it can do comes
/// from [`Container`].
#[derive(Debug, Clone)]
pub struct Storage {
    pub id: String,
    pub name: String,
    /// Provider short name, used to address the storage in remote paths.
    pub provider: String,
    /// Id of the project node the storage belongs to.
    pub node: Option<String>,
    files_url: Option<String>,
    new_folder_url: Option<String>,
    upload_url: Option<String>,
}

impl Storage {
    pub(crate) fn from_resource(resource: wire::Resource) -> Result<Self> {
        let files_url = resource.files_link().map(str::to_owned);
        let id = resource.id;
        let name = require_attr(resource.attributes.name, &id, "name")?;
        let provider = require_attr(resource.attributes.provider, &id, "provider")?;
        Ok(Self {
            id,
            name,
            provider,
            node: resource.attributes.node,
            files_url,
            new_folder_url: resource.links.new_folder,
            upload_url: resource.links.upload,
        })
    }

    /// Root path of the storage's tree.
    pub fn path(&self) -> &str {
        "/"
    }
}

impl Container for Storage {
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
