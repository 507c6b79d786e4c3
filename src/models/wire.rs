//! Serde models for the JSON:API wire format.
//!
//! These structs mirror the service payloads one-to-one. Only the fields
//! this client reads are declared; everything else is ignored. Conversion
//! into domain types (with required-field checks) lives in the sibling
//! modules.

use serde::Deserialize;
use serde_json::Value;

/// Top-level document wrapping a single resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub data: Resource,
}

/// Top-level document wrapping one page of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub data: Vec<Resource>,
    #[serde(default)]
    pub links: PageLinks,
}

/// Pagination links of a listing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    pub next: Option<String>,
}

/// One JSON:API resource: a project node, a storage provider, a folder
/// or a file.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub relationships: Relationships,
    #[serde(default)]
    pub links: ResourceLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attributes {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub materialized_path: Option<String>,
    pub size: Option<u64>,
    pub provider: Option<String>,
    pub node: Option<String>,
    pub title: Option<String>,
    pub date_modified: Option<String>,
    /// Provider-specific extras (hashes, version counts). Passed through
    /// untyped.
    pub extra: Option<Value>,
}

/// Action links attached to a resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceLinks {
    pub download: Option<String>,
    pub upload: Option<String>,
    pub delete: Option<String>,
    pub new_folder: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationships {
    pub files: Option<Relationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub links: RelationshipLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipLinks {
    pub related: RelatedLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedLink {
    pub href: String,
}

impl Resource {
    /// Listing link for the resource's children, when present.
    pub fn files_link(&self) -> Option<&str> {
        self.relationships
            .files
            .as_ref()
            .map(|files| files.links.related.href.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_resource_document() {
        let raw = r#"{
            "data": {
                "id": "abc12",
                "attributes": {"title": "Example project", "category": "project"},
                "relationships": {
                    "files": {"links": {"related": {"href": "https://api.test/v2/nodes/abc12/files/"}}}
                },
                "links": {"self": "https://api.test/v2/nodes/abc12/"}
            }
        }"#;
        let document: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(document.data.id, "abc12");
        assert_eq!(
            document.data.attributes.title.as_deref(),
            Some("Example project")
        );
        assert_eq!(
            document.data.files_link(),
            Some("https://api.test/v2/nodes/abc12/files/")
        );
    }

    #[test]
    fn parses_listing_page_with_next_link() {
        let raw = r#"{
            "data": [
                {
                    "id": "5943",
                    "attributes": {
                        "kind": "file",
                        "name": "readme.md",
                        "path": "/5943",
                        "materialized_path": "/docs/readme.md",
                        "size": 12,
                        "provider": "osfstorage"
                    },
                    "links": {
                        "download": "https://files.test/v1/resources/abc12/providers/osfstorage/5943",
                        "delete": "https://files.test/v1/resources/abc12/providers/osfstorage/5943"
                    }
                }
            ],
            "links": {"next": "https://api.test/v2/nodes/abc12/files/osfstorage/?page=2", "prev": null}
        }"#;
        let page: Collection = serde_json::from_str(raw).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].attributes.kind.as_deref(), Some("file"));
        assert_eq!(page.data[0].attributes.size, Some(12));
        assert_eq!(
            page.links.next.as_deref(),
            Some("https://api.test/v2/nodes/abc12/files/osfstorage/?page=2")
        );
    }

    #[test]
    fn missing_links_sections_default_to_empty() {
        let raw = r#"{"data": [{"id": "x1"}]}"#;
        let page: Collection = serde_json::from_str(raw).unwrap();
        assert!(page.links.next.is_none());
        assert!(page.data[0].files_link().is_none());
        assert!(page.data[0].links.download.is_none());
    }
}
