//! Streaming transfer primitives: upload, download, delete and folder
//! creation against the action links carried by resources.

use crate::error::{OsfError, Result};
use crate::http::{RequestBody, Transport, TransportRequest};
use crate::models::wire;
use log::{info, warn};
use reqwest::StatusCode;
use std::io::{BufRead, Write};

/// Outcome of a create-folder request.
pub enum FolderCreation {
    Created(wire::Resource),
    AlreadyExists,
}

/// Upload `source` as a new file named `name`. `display_path` is the
/// full remote path, used for reporting.
///
/// The source is peeked first: an empty source is sent as an explicit
/// zero-length body, because handing an exhausted stream handle to the
/// transport can silently create nothing at all on some providers.
pub fn upload<T, R>(
    transport: &T,
    upload_url: &str,
    name: &str,
    display_path: &str,
    mut source: R,
) -> Result<()>
where
    T: Transport,
    R: BufRead + Send + 'static,
{
    let body = if source.fill_buf()?.is_empty() {
        RequestBody::Empty
    } else {
        RequestBody::Stream(Box::new(source))
    };
    let request = TransportRequest::put(upload_url)
        .param("name", name)
        .body(body);
    let response = transport.request(request)?;
    let status = response.status();
    if status == StatusCode::CONFLICT {
        return Err(OsfError::FileAlreadyExists(display_path.to_owned()));
    }
    if !status.is_success() {
        return Err(OsfError::RemoteWrite {
            url: upload_url.to_owned(),
            status,
        });
    }
    info!("uploaded {}", display_path);
    Ok(())
}

/// Stream the body behind `url` into `sink` without buffering the whole
/// file. Returns the number of bytes written.
pub fn download<T: Transport, W: Write + ?Sized>(
    transport: &T,
    url: &str,
    sink: &mut W,
) -> Result<u64> {
    let response = transport.request(TransportRequest::get(url))?;
    let status = response.status();
    if !status.is_success() {
        return Err(OsfError::Response {
            url: url.to_owned(),
            status,
        });
    }
    let bytes = response.copy_to(sink)?;
    info!("downloaded {} bytes from {}", bytes, url);
    Ok(bytes)
}

/// Delete the resource behind `url`. A target that is already gone
/// counts as success.
pub fn delete<T: Transport>(transport: &T, url: &str) -> Result<()> {
    let response = transport.request(TransportRequest::delete(url))?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        warn!("delete target already gone: {}", url);
        return Ok(());
    }
    if !status.is_success() {
        return Err(OsfError::RemoteWrite {
            url: url.to_owned(),
            status,
        });
    }
    info!("deleted {}", url);
    Ok(())
}

/// Ask the service to create a folder named `name`. A 409 is not an
/// error here; the caller decides how to locate the existing folder.
pub fn create_folder<T: Transport>(
    transport: &T,
    new_folder_url: &str,
    name: &str,
) -> Result<FolderCreation> {
    let request = TransportRequest::put(new_folder_url).param("name", name);
    let response = transport.request(request)?;
    let status = response.status();
    if status == StatusCode::CONFLICT {
        return Ok(FolderCreation::AlreadyExists);
    }
    if !status.is_success() {
        return Err(OsfError::RemoteWrite {
            url: new_folder_url.to_owned(),
            status,
        });
    }
    let document: wire::Document = response.json()?;
    info!("created folder '{}'", name);
    Ok(FolderCreation::Created(document.data))
}
