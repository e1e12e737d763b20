//! Documents attached to orders.

use reqwest::Url;
use serde::Serialize;

use crate::document::DocumentValue;

/// Fallback filename when a link has no usable last segment.
const DEFAULT_FILENAME: &str = "document";

/// A downloadable document listed on an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLink {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Absolute URL or a path relative to the API base
    pub link: String,
}

impl DocumentLink {
    /// Display label: the name, else the id, else the link.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.link)
    }
}

/// A fetched document body.
#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Documents of the first order in a response.
///
/// Collections contribute their first member's documents; a single order
/// contributes its own. Entries without a `link` are skipped.
pub fn extract_documents(value: &DocumentValue) -> Vec<DocumentLink> {
    let Some(order) = value.orders().first() else {
        return Vec::new();
    };
    let Some(documents) = order.get("documents").and_then(DocumentValue::as_sequence) else {
        return Vec::new();
    };

    documents
        .iter()
        .filter_map(|doc| {
            let link = doc.get("link")?.as_str()?.to_string();
            Some(DocumentLink {
                id: doc.get("id").and_then(DocumentValue::scalar_text),
                name: doc.get("name").and_then(DocumentValue::scalar_text),
                link,
            })
        })
        .collect()
}

/// Last non-empty path segment of `url`, or `"document"`.
pub(super) fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_single_order() {
        let value = DocumentValue::from(json!({
            "id": 1,
            "documents": [
                {"id": 10, "name": "Invoice.pdf", "link": "/api/v1/documents/10/file"},
                {"id": 11, "link": "https://cdn.example.com/packing.pdf"},
                {"id": 12, "name": "no link"}
            ]
        }));
        let docs = extract_documents(&value);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].label(), "Invoice.pdf");
        assert_eq!(docs[1].label(), "11");
        assert_eq!(docs[1].link, "https://cdn.example.com/packing.pdf");
    }

    #[test]
    fn test_extract_uses_first_member() {
        let value = DocumentValue::from(json!({
            "hydra:member": [
                {"documents": [{"id": "a", "link": "/a"}]},
                {"documents": [{"id": "b", "link": "/b"}]}
            ]
        }));
        let docs = extract_documents(&value);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].link, "/a");
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract_documents(&DocumentValue::from(json!([]))).is_empty());
        assert!(extract_documents(&DocumentValue::from(json!({"id": 1}))).is_empty());
    }

    #[test]
    fn test_filename_from_url() {
        let url = Url::parse("https://x.test/api/docs/invoice-12.pdf?sig=abc").unwrap();
        assert_eq!(filename_from_url(&url), "invoice-12.pdf");
        let url = Url::parse("https://x.test/").unwrap();
        assert_eq!(filename_from_url(&url), "document");
    }
}
