//! Top-level client: resolves project nodes and owns the transport.

use crate::config::Config;
use crate::error::{OsfError, Result};
use crate::http::{HttpTransport, Transport, TransportRequest};
use crate::models::{wire, Project};
use log::debug;
use url::Url;

/// Entry point for talking to the service. Generic over the transport
/// so tests can substitute a scripted one.
pub struct Osf<T: Transport = HttpTransport> {
    transport: T,
    base_url: Url,
    has_credentials: bool,
}

impl Osf<HttpTransport> {
    /// Build a client from configuration, attaching basic auth when both
    /// username and password are present.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = config.credentials();
        let has_credentials = credentials.is_some();
        Ok(Self {
            transport: HttpTransport::new(credentials)?,
            base_url: parse_base_url(&config.base_url)?,
            has_credentials,
        })
    }
}

impl<T: Transport> Osf<T> {
    /// Client over an arbitrary transport.
    pub fn with_transport(transport: T, base_url: &str, has_credentials: bool) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: parse_base_url(base_url)?,
            has_credentials,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Error unless a username and password were supplied. Checked
    /// before any write operation.
    pub fn require_credentials(&self) -> Result<()> {
        if self.has_credentials {
            Ok(())
        } else {
            Err(OsfError::MissingCredentials)
        }
    }

    /// Fetch a project node by id.
    pub fn project(&self, id: &str) -> Result<Project> {
        let url = self.base_url.join(&format!("nodes/{}/", id))?;
        debug!("fetching project {}", id);
        let response = self.transport.request(TransportRequest::get(url.as_str()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(OsfError::Response {
                url: url.to_string(),
                status,
            });
        }
        let document: wire::Document = response.json()?;
        Project::from_resource(document.data)
    }
}

// Joining relative paths silently drops the last segment of a base URL
// without a trailing slash, so one is enforced here.
fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
