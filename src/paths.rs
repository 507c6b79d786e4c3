//! Remote path handling.
//!
//! Remote paths are `/`-separated and rooted at a storage. All comparisons
//! and lookups happen on normalized paths so that `docs/readme.md`,
//! `/docs/readme.md` and `/docs//readme.md` name the same remote file.

use crate::error::{OsfError, Result};

/// Storage providers that can be addressed by a path prefix.
pub const KNOWN_PROVIDERS: &[&str] = &[
    "osfstorage",
    "box",
    "cloudfiles",
    "dataverse",
    "dropbox",
    "figshare",
    "github",
    "gitlab",
    "googledrive",
    "owncloud",
    "s3",
];

/// Storage used when a path carries no provider prefix.
pub const DEFAULT_PROVIDER: &str = "osfstorage";

/// Normalize a remote path: ensure a leading `/`, collapse repeated
/// separators, drop `.` segments and resolve `..` textually. The result
/// never ends in `/` except for the root path itself.
pub fn norm_remote_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in &segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Split a user-supplied remote path into a storage name and the path
/// within that storage. The first segment selects a storage only when it
/// names a known provider; otherwise the whole path lives on the default
/// storage.
pub fn split_storage(path: &str) -> (String, String) {
    let normalized = norm_remote_path(path);
    let rest = normalized.trim_start_matches('/');
    if let Some((first, remainder)) = rest.split_once('/') {
        if KNOWN_PROVIDERS.contains(&first) {
            return (first.to_owned(), format!("/{remainder}"));
        }
    }
    (DEFAULT_PROVIDER.to_owned(), normalized)
}

/// Last segment of a normalized remote path, i.e. the file name.
pub fn file_name(path: &str) -> Result<&str> {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(OsfError::InvalidPath(path.to_owned())),
    }
}

/// Display form of a remote file path, prefixed with its storage name
/// with a single separator in between.
pub fn storage_join(storage: &str, path: &str) -> String {
    format!("{}/{}", storage, path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_dots() {
        assert_eq!(norm_remote_path("docs/readme.md"), "/docs/readme.md");
        assert_eq!(norm_remote_path("/docs//readme.md"), "/docs/readme.md");
        assert_eq!(norm_remote_path("./docs/./readme.md"), "/docs/readme.md");
        assert_eq!(norm_remote_path("docs/sub/../readme.md"), "/docs/readme.md");
        assert_eq!(norm_remote_path("/docs/"), "/docs");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["", "/", "a//b/", "../x", "a/./b/../c"] {
            let once = norm_remote_path(raw);
            assert_eq!(norm_remote_path(&once), once);
        }
    }

    #[test]
    fn empty_and_root_normalize_to_root() {
        assert_eq!(norm_remote_path(""), "/");
        assert_eq!(norm_remote_path("/"), "/");
        assert_eq!(norm_remote_path("/../.."), "/");
    }

    #[test]
    fn splits_known_provider_prefix() {
        assert_eq!(
            split_storage("osfstorage/docs/readme.md"),
            ("osfstorage".to_owned(), "/docs/readme.md".to_owned())
        );
        assert_eq!(
            split_storage("github/a.txt"),
            ("github".to_owned(), "/a.txt".to_owned())
        );
    }

    #[test]
    fn defaults_to_osfstorage_without_prefix() {
        assert_eq!(
            split_storage("docs/readme.md"),
            ("osfstorage".to_owned(), "/docs/readme.md".to_owned())
        );
        // A bare provider name with no `/` after it is a file name.
        assert_eq!(
            split_storage("osfstorage"),
            ("osfstorage".to_owned(), "/osfstorage".to_owned())
        );
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(file_name("/docs/readme.md").unwrap(), "readme.md");
        assert_eq!(file_name("/readme.md").unwrap(), "readme.md");
        assert!(file_name("/").is_err());
    }

    #[test]
    fn storage_join_uses_single_separator() {
        assert_eq!(
            storage_join("osfstorage", "/docs/readme.md"),
            "osfstorage/docs/readme.md"
        );
    }
}
