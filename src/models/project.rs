//! Project nodes.

use crate::error::{OsfError, Result};
use crate::http::Transport;
use crate::models::wire;
use crate::models::Storage;
use crate::walk::{fetch_page, DEFAULT_PAGE_LIMIT};
use std::cell::RefCell;

/// A project node, the entry point into a remote file hierarchy. Holds
/// the link to its storage providers and caches the resolved list so
/// repeated lookups cost one listing.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    storages_url: Option<String>,
    storages: RefCell<Option<Vec<Storage>>>,
}

impl Project {
    pub(crate) fn from_resource(resource: wire::Resource) -> Result<Self> {
        let storages_url = resource.files_link().map(str::to_owned);
        Ok(Self {
            id: resource.id,
            title: resource.attributes.title,
            storages_url,
            storages: RefCell::new(None),
        })
    }

    /// All storage providers of the project, in listing order. The first
    /// call fetches every page of the providers listing; later calls
    /// return the cached result. A listing chaining more pages than the
    /// traversal bound fails instead of looping.
    pub fn storages<T: Transport>(&self, transport: &T) -> Result<Vec<Storage>> {
        if let Some(cached) = self.storages.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let url = self
            .storages_url
            .as_deref()
            .ok_or_else(|| OsfError::MissingLink {
                id: self.id.clone(),
                link: "files",
            })?;
        let mut storages = Vec::new();
        let mut next = Some(url.to_owned());
        let mut pages_fetched = 0usize;
        while let Some(page_url) = next {
            if pages_fetched >= DEFAULT_PAGE_LIMIT {
                return Err(OsfError::PageLimitExceeded(DEFAULT_PAGE_LIMIT));
            }
            let page = fetch_page(transport, &page_url)?;
            pages_fetched += 1;
            for resource in page.entries {
                storages.push(Storage::from_resource(resource)?);
            }
            next = page.next;
        }
        *self.storages.borrow_mut() = Some(storages.clone());
        Ok(storages)
    }

    /// The storage with the given provider name.
    pub fn storage<T: Transport>(&self, transport: &T, provider: &str) -> Result<Storage> {
        self.storages(transport)?
            .into_iter()
            .find(|storage| storage.provider == provider)
            .ok_or_else(|| OsfError::NoSuchStorage(provider.to_owned()))
    }
}
