//! Command implementations for the `osf` binary. Each function maps one
//! subcommand onto project lookup, storage selection and the walker or
//! transfer calls it needs.

use crate::client::Osf;
use crate::error::OsfError;
use crate::http::Transport;
use crate::models::{Container, Node};
use crate::paths;
use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Download every file from every storage of the project into `output`,
/// which defaults to a directory named after the project id. Files land
/// under `<output>/<storage name>/<remote path>`.
pub fn clone<T: Transport>(osf: &Osf<T>, project_id: &str, output: Option<&Path>) -> Result<()> {
    let transport = osf.transport();
    let project = osf.project(project_id)?;
    if let Some(title) = &project.title {
        info!("cloning project '{}' ({})", title, project.id);
    }
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(project_id));
    let mut count = 0u64;
    for storage in project.storages(transport)? {
        let prefix = output.join(&storage.name);
        for node in storage.files(transport)? {
            if let Node::File(file) = node? {
                let local = prefix.join(file.path.trim_start_matches('/'));
                if let Some(parent) = local.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory {}", parent.display())
                    })?;
                }
                let sink = fs::File::create(&local)
                    .with_context(|| format!("failed to create {}", local.display()))?;
                let mut sink = BufWriter::new(sink);
                file.write_to(transport, &mut sink)?;
                sink.flush()?;
                count += 1;
            }
        }
    }
    info!("cloned {} files into {}", count, output.display());
    Ok(())
}

/// Download a single file. `local` defaults to the remote base name in
/// the working directory; an existing local file aborts unless `force`.
pub fn fetch<T: Transport>(
    osf: &Osf<T>,
    project_id: &str,
    remote: &str,
    local: Option<&Path>,
    force: bool,
) -> Result<()> {
    let transport = osf.transport();
    let (storage_name, remote_path) = paths::split_storage(remote);
    let local = match local {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(paths::file_name(&remote_path)?),
    };
    if local.exists() && !force {
        return Err(OsfError::LocalConflict(local).into());
    }
    let project = osf.project(project_id)?;
    let storage = project.storage(transport, &storage_name)?;
    for node in storage.files(transport)? {
        if let Node::File(file) = node? {
            if file.path == remote_path {
                if let Some(parent) = local.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create directory {}", parent.display())
                        })?;
                    }
                }
                let sink = fs::File::create(&local)
                    .with_context(|| format!("failed to create {}", local.display()))?;
                let mut sink = BufWriter::new(sink);
                let bytes = file.write_to(transport, &mut sink)?;
                sink.flush()?;
                info!("fetched {} bytes to {}", bytes, local.display());
                return Ok(());
            }
        }
    }
    bail!(
        "no remote file matches {} in storage {}",
        remote_path,
        storage_name
    );
}

/// Write every file of every storage to `out`, one `<storage>/<path>`
/// line each.
pub fn list<T: Transport>(osf: &Osf<T>, project_id: &str, out: &mut impl Write) -> Result<()> {
    let transport = osf.transport();
    let project = osf.project(project_id)?;
    for storage in project.storages(transport)? {
        for node in storage.files(transport)? {
            if let Node::File(file) = node? {
                writeln!(out, "{}", paths::storage_join(&storage.name, &file.path))?;
            }
        }
    }
    Ok(())
}

/// Upload a local file to `destination`, creating intermediate remote
/// folders as needed. A destination ending in `/` names a folder; the
/// file keeps its local name.
pub fn upload<T: Transport>(
    osf: &Osf<T>,
    project_id: &str,
    source: &Path,
    destination: &str,
) -> Result<()> {
    osf.require_credentials()?;
    let transport = osf.transport();
    let destination = if destination.ends_with('/') {
        let name = source
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("source {} has no usable file name", source.display()))?;
        format!("{destination}{name}")
    } else {
        destination.to_owned()
    };
    let (storage_name, remote_path) = paths::split_storage(&destination);
    let project = osf.project(project_id)?;
    let storage = project.storage(transport, &storage_name)?;
    let file =
        fs::File::open(source).with_context(|| format!("failed to open {}", source.display()))?;
    storage.create_file(transport, &remote_path, BufReader::new(file))?;
    Ok(())
}

/// Delete a single remote file located by its normalized path.
pub fn remove<T: Transport>(osf: &Osf<T>, project_id: &str, target: &str) -> Result<()> {
    osf.require_credentials()?;
    let transport = osf.transport();
    let (storage_name, remote_path) = paths::split_storage(target);
    let project = osf.project(project_id)?;
    let storage = project.storage(transport, &storage_name)?;
    for node in storage.files(transport)? {
        if let Node::File(file) = node? {
            if file.path == remote_path {
                file.remove(transport)?;
                info!("removed {}", paths::storage_join(&storage.name, &file.path));
                return Ok(());
            }
        }
    }
    bail!(
        "no remote file matches {} in storage {}",
        remote_path,
        storage_name
    );
}
