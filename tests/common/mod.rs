#![allow(dead_code)]

//! Shared test support: a scripted transport and JSON fixtures.

use osfcli::client::Osf;
use osfcli::error::Result as OsfResult;
use osfcli::http::{RequestBody, Transport, TransportRequest, TransportResponse};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://api.test/v2/";
pub const PROJECT_URL: &str = "https://api.test/v2/nodes/abc12/";
pub const STORAGES_URL: &str = "https://api.test/v2/nodes/abc12/files/";
pub const STORE_FILES_URL: &str = "https://api.test/v2/nodes/abc12/files/osfstorage/";
pub const STORE_UPLOAD_URL: &str = "https://files.test/v1/abc12/osfstorage/";
pub const STORE_NEW_FOLDER_URL: &str = "https://files.test/v1/abc12/osfstorage/?kind=folder";

/// Body of a request as the transport saw it. Stream bodies are drained
/// so tests can assert on the exact bytes sent.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    None,
    Empty,
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: RecordedBody,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

struct Route {
    responses: Vec<(u16, Vec<u8>)>,
    hits: usize,
}

/// Scripted transport. Responses are registered per (method, url); a
/// route with several responses serves them in order and then repeats
/// the last one, so repeated walks see a stable tree. Every request is
/// recorded for assertions.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(String, String), Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON response for `method url`.
    pub fn on(&self, method: &str, url: &str, status: u16, body: &Value) -> &Self {
        self.on_raw(method, url, status, body.to_string().into_bytes())
    }

    /// Register a raw-byte response for `method url`.
    pub fn on_raw(&self, method: &str, url: &str, status: u16, body: Vec<u8>) -> &Self {
        let mut routes = self.routes.lock().unwrap();
        routes
            .entry((method.to_owned(), url.to_owned()))
            .or_insert_with(|| Route {
                responses: Vec::new(),
                hits: 0,
            })
            .responses
            .push((status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// All requests of one method, in issue order.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    /// How many times `method url` was requested.
    pub fn hits(&self, method: &str, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }
}

impl Transport for MockTransport {
    fn request(&self, request: TransportRequest) -> OsfResult<TransportResponse> {
        let method = request.method.to_string();
        let body = match request.body {
            RequestBody::None => RecordedBody::None,
            RequestBody::Empty => RecordedBody::Empty,
            RequestBody::Stream(mut reader) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).unwrap();
                RecordedBody::Bytes(bytes)
            }
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            url: request.url.clone(),
            params: request.params.clone(),
            body,
        });

        let mut routes = self.routes.lock().unwrap();
        let route = match routes.get_mut(&(method.clone(), request.url.clone())) {
            Some(route) => route,
            None => panic!("no scripted response for {} {}", method, request.url),
        };
        let index = route.hits.min(route.responses.len() - 1);
        route.hits += 1;
        let (status, bytes) = route.responses[index].clone();
        Ok(TransportResponse::new(
            StatusCode::from_u16(status).unwrap(),
            Box::new(Cursor::new(bytes)),
        ))
    }
}

/// Client over a shared handle to the scripted transport.
pub fn client(mock: &MockTransport, authenticated: bool) -> Osf<MockTransport> {
    Osf::with_transport(mock.clone(), BASE_URL, authenticated).unwrap()
}

/// Script the standard project document and a one-storage providers
/// listing, the common setup for most scenarios.
pub fn script_project_with_storage(mock: &MockTransport) {
    mock.on(
        "GET",
        PROJECT_URL,
        200,
        &fixtures::project_document("abc12", "Example project", STORAGES_URL),
    );
    mock.on(
        "GET",
        STORAGES_URL,
        200,
        &fixtures::page(
            &[fixtures::storage(
                "abc12:osfstorage",
                "osfstorage",
                STORE_FILES_URL,
                STORE_UPLOAD_URL,
                STORE_NEW_FOLDER_URL,
            )],
            None,
        ),
    );
}

pub mod fixtures {
    use serde_json::{json, Value};

    pub fn project_document(id: &str, title: &str, files_url: &str) -> Value {
        json!({
            "data": {
                "id": id,
                "attributes": {"title": title, "category": "project"},
                "relationships": {
                    "files": {"links": {"related": {"href": files_url}}}
                }
            }
        })
    }

    pub fn storage(
        id: &str,
        provider: &str,
        files_url: &str,
        upload_url: &str,
        new_folder_url: &str,
    ) -> Value {
        json!({
            "id": id,
            "attributes": {
                "kind": "folder",
                "name": provider,
                "path": "/",
                "node": "abc12",
                "provider": provider
            },
            "relationships": {
                "files": {"links": {"related": {"href": files_url}}}
            },
            "links": {"upload": upload_url, "new_folder": new_folder_url}
        })
    }

    pub fn folder(
        id: &str,
        name: &str,
        path: &str,
        files_url: &str,
        upload_url: &str,
        new_folder_url: &str,
    ) -> Value {
        json!({
            "id": id,
            "attributes": {
                "kind": "folder",
                "name": name,
                "materialized_path": path,
                "provider": "osfstorage"
            },
            "relationships": {
                "files": {"links": {"related": {"href": files_url}}}
            },
            "links": {"upload": upload_url, "new_folder": new_folder_url}
        })
    }

    pub fn file(id: &str, name: &str, path: &str, download_url: &str) -> Value {
        json!({
            "id": id,
            "attributes": {
                "kind": "file",
                "name": name,
                "path": format!("/{id}"),
                "materialized_path": path,
                "size": 11,
                "provider": "osfstorage"
            },
            "links": {"download": download_url, "delete": download_url}
        })
    }

    pub fn page(entries: &[Value], next: Option<&str>) -> Value {
        json!({"data": entries, "links": {"next": next}})
    }

    pub fn document(resource: &Value) -> Value {
        json!({"data": resource})
    }
}
