//! Domain models for the remote hierarchy.
//!
//! The wire structs in [`wire`] mirror the JSON payloads; the types here
//! are what the rest of the crate works with. [`Container`] is the one
//! capability shared by storages and folders: anything with a listing
//! link, a new-folder link and an upload link can be walked, extended
//! with folder chains and uploaded into.

pub mod file;
pub mod project;
pub mod storage;
pub mod wire;

pub use file::{File, Folder, Node};
pub use project::Project;
pub use storage::Storage;

use crate::error::{OsfError, Result};
use crate::http::Transport;
use crate::paths;
use crate::transfer::{self, FolderCreation};
use crate::walk::{NodeFilter, Walk};
use log::debug;
use std::io::BufRead;

fn require_attr(value: Option<String>, id: &str, attr: &'static str) -> Result<String> {
    value.ok_or_else(|| OsfError::MissingAttribute {
        id: id.to_owned(),
        attr,
    })
}

/// Anything that contains files: a [`Storage`] root or a [`Folder`].
///
/// Implementors provide their identity and action links; traversal,
/// folder-chain resolution and file creation are defined once on top of
/// those. Links are checked at the point of use, so a resource missing
/// a link only fails the operations that need it.
pub trait Container {
    /// Resource id, used in error reporting.
    fn container_id(&self) -> &str;

    /// Paginated listing link of the direct children.
    fn files_url(&self) -> Result<&str>;

    /// Link for creating a subfolder.
    fn new_folder_url(&self) -> Result<&str>;

    /// Link for uploading a file directly into this container.
    fn new_file_url(&self) -> Result<&str>;

    fn require_link<'a>(&self, link: Option<&'a str>, name: &'static str) -> Result<&'a str> {
        link.ok_or_else(|| OsfError::MissingLink {
            id: self.container_id().to_owned(),
            link: name,
        })
    }

    /// Walk the whole subtree, yielding nodes that pass `filter`.
    fn walk<'a, T: Transport>(&self, transport: &'a T, filter: NodeFilter) -> Result<Walk<'a, T>> {
        Ok(Walk::new(transport, self.files_url()?, filter))
    }

    /// Walk the whole subtree, yielding files only.
    fn files<'a, T: Transport>(&self, transport: &'a T) -> Result<Walk<'a, T>> {
        self.walk(transport, NodeFilter::Files)
    }

    /// List the direct subfolders, without descending into them.
    fn folders<'a, T: Transport>(&self, transport: &'a T) -> Result<Walk<'a, T>> {
        Ok(Walk::shallow(
            transport,
            self.files_url()?,
            NodeFilter::Folders,
        ))
    }

    /// Create a subfolder, or return the existing one if the service
    /// reports the name as taken.
    fn create_folder<T: Transport>(&self, transport: &T, name: &str) -> Result<Folder> {
        let url = self.new_folder_url()?;
        match transfer::create_folder(transport, url, name)? {
            FolderCreation::Created(resource) => Folder::from_resource(resource),
            FolderCreation::AlreadyExists => {
                debug!("folder '{}' already exists, looking it up", name);
                for node in self.folders(transport)? {
                    if let Node::Folder(folder) = node? {
                        if folder.name == name {
                            return Ok(folder);
                        }
                    }
                }
                Err(OsfError::MissingFolder(name.to_owned()))
            }
        }
    }

    /// Materialize the folder chain for `dir_path`, creating missing
    /// folders along the way. Returns `None` when the path has no
    /// directory segments, i.e. the target is this container itself.
    fn resolve_or_create<T: Transport>(
        &self,
        transport: &T,
        dir_path: &str,
    ) -> Result<Option<Folder>> {
        let mut parent: Option<Folder> = None;
        for segment in dir_path.split('/').filter(|segment| !segment.is_empty()) {
            let next = match &parent {
                Some(folder) => folder.create_folder(transport, segment)?,
                None => self.create_folder(transport, segment)?,
            };
            parent = Some(next);
        }
        Ok(parent)
    }

    /// Upload a new file at `path` (relative to this container), streaming
    /// `source` as the request body. Missing intermediate folders are
    /// created first.
    fn create_file<T, R>(&self, transport: &T, path: &str, source: R) -> Result<()>
    where
        T: Transport,
        R: BufRead + Send + 'static,
    {
        let path = paths::norm_remote_path(path);
        let name = paths::file_name(&path)?.to_owned();
        let dir_path = &path[..path.len() - name.len()];
        let upload_url = match self.resolve_or_create(transport, dir_path)? {
            Some(folder) => folder.new_file_url()?.to_owned(),
            None => self.new_file_url()?.to_owned(),
        };
        transfer::upload(transport, &upload_url, &name, &path, source)
    }
}
