//! Paginated listings and lazy tree traversal.
//!
//! [`fetch_page`] is the one-page-at-a-time primitive; [`Walk`] layers a
//! depth-first traversal on top of it. Memory stays bounded by one page
//! of entries plus the stack of folder links still to expand, so a
//! caller can stop consuming after the first match without paying for
//! the rest of the tree.

use crate::error::{OsfError, Result};
use crate::http::{Transport, TransportRequest};
use crate::models::wire;
use crate::models::{Container, Node};
use log::debug;
use std::collections::VecDeque;

/// Total pages a single traversal may fetch, across the root listing
/// and every subfolder it descends into. Guards against a service
/// emitting cyclic `next` links.
pub const DEFAULT_PAGE_LIMIT: usize = 10_000;

/// One page of a paginated listing.
#[derive(Debug)]
pub struct Page {
    pub entries: Vec<wire::Resource>,
    pub next: Option<String>,
}

/// Fetch a single listing page. No retries, no recursion, no filtering.
pub fn fetch_page<T: Transport>(transport: &T, url: &str) -> Result<Page> {
    debug!("fetching page {}", url);
    let response = transport.request(TransportRequest::get(url))?;
    let status = response.status();
    if !status.is_success() {
        return Err(OsfError::Response {
            url: url.to_owned(),
            status,
        });
    }
    let collection: wire::Collection = response.json()?;
    Ok(Page {
        entries: collection.data,
        next: collection.links.next,
    })
}

/// Which node kinds a walk yields. Folders are always descended into
/// when the walk recurses; the filter only controls what is yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFilter {
    Files,
    Folders,
    All,
}

impl NodeFilter {
    fn accepts(self, node: &Node) -> bool {
        match (self, node) {
            (NodeFilter::Files, Node::File(_)) => true,
            (NodeFilter::Folders, Node::Folder(_)) => true,
            (NodeFilter::All, _) => true,
            _ => false,
        }
    }
}

/// Lazy iterator over the nodes reachable from a root listing link.
///
/// Entries are yielded in page order. The next page of the current
/// listing is followed before any pending subfolder is expanded, and
/// subfolder links wait on a stack until their turn, so traversal is
/// depth-first across folders without any ordering promise between
/// siblings beyond page order. Each call to the constructor starts from
/// scratch; no cursor state is shared between walks.
///
/// The first error (transport, non-success page, malformed resource) is
/// yielded as an `Err` item, after which the iterator is exhausted.
pub struct Walk<'a, T: Transport> {
    transport: &'a T,
    filter: NodeFilter,
    recurse: bool,
    entries: VecDeque<wire::Resource>,
    next_url: Option<String>,
    pending: Vec<String>,
    pages_fetched: usize,
    page_limit: usize,
    done: bool,
}

impl<'a, T: Transport> Walk<'a, T> {
    /// Recursive walk over the whole subtree under `root_url`.
    pub fn new(transport: &'a T, root_url: &str, filter: NodeFilter) -> Self {
        Self::with_recursion(transport, root_url, filter, true)
    }

    /// Walk of a single listing, without descending into subfolders.
    pub fn shallow(transport: &'a T, root_url: &str, filter: NodeFilter) -> Self {
        Self::with_recursion(transport, root_url, filter, false)
    }

    fn with_recursion(transport: &'a T, root_url: &str, filter: NodeFilter, recurse: bool) -> Self {
        Self {
            transport,
            filter,
            recurse,
            entries: VecDeque::new(),
            next_url: None,
            pending: vec![root_url.to_owned()],
            pages_fetched: 0,
            page_limit: DEFAULT_PAGE_LIMIT,
            done: false,
        }
    }

    /// Override the page bound, mainly for tests.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    fn fail(&mut self, error: OsfError) -> Option<Result<Node>> {
        self.done = true;
        Some(Err(error))
    }
}

impl<'a, T: Transport> Iterator for Walk<'a, T> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(resource) = self.entries.pop_front() {
                let node = match Node::from_resource(resource) {
                    Ok(node) => node,
                    Err(error) => return self.fail(error),
                };
                if self.recurse {
                    if let Node::Folder(folder) = &node {
                        match folder.files_url() {
                            Ok(url) => self.pending.push(url.to_owned()),
                            Err(error) => return self.fail(error),
                        }
                    }
                }
                if self.filter.accepts(&node) {
                    return Some(Ok(node));
                }
                continue;
            }

            // Finish the current listing before expanding pending folders.
            let url = match self.next_url.take() {
                Some(url) => url,
                None => match self.pending.pop() {
                    Some(url) => url,
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };
            if self.pages_fetched >= self.page_limit {
                return self.fail(OsfError::PageLimitExceeded(self.page_limit));
            }
            match fetch_page(self.transport, &url) {
                Ok(page) => {
                    self.pages_fetched += 1;
                    self.entries = page.entries.into();
                    self.next_url = page.next;
                }
                Err(error) => return self.fail(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::File;

    fn file_node(path: &str) -> Node {
        let resource: wire::Resource = serde_json::from_value(serde_json::json!({
            "id": "f1",
            "attributes": {"kind": "file", "name": "x", "path": path}
        }))
        .unwrap();
        Node::File(File::from_resource(resource).unwrap())
    }

    fn folder_node(path: &str) -> Node {
        let resource: wire::Resource = serde_json::from_value(serde_json::json!({
            "id": "d1",
            "attributes": {"kind": "folder", "name": "x", "path": path}
        }))
        .unwrap();
        match Node::from_resource(resource).unwrap() {
            node @ Node::Folder(_) => node,
            _ => unreachable!(),
        }
    }

    #[test]
    fn filter_gates_yielded_kinds() {
        let file = file_node("/a.txt");
        let folder = folder_node("/docs");
        assert!(NodeFilter::Files.accepts(&file));
        assert!(!NodeFilter::Files.accepts(&folder));
        assert!(NodeFilter::Folders.accepts(&folder));
        assert!(!NodeFilter::Folders.accepts(&file));
        assert!(NodeFilter::All.accepts(&file));
        assert!(NodeFilter::All.accepts(&folder));
    }
}
