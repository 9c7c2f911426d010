//! Endpoint paths and request bodies.

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded::byte_serialize;

// ============================================================================
// Paths
// ============================================================================

pub(crate) const COLLECTIONS: &str = "/collections";

pub(crate) fn collection(id: &str) -> String {
    format!("/collections/{}", id)
}

/// Document creation addresses the collection through the query string.
pub(crate) fn create_document(collection_id: &str) -> String {
    let id: String = byte_serialize(collection_id.as_bytes()).collect();
    format!("/collections/documents?collection={}", id)
}

pub(crate) fn documents(collection_id: &str) -> String {
    format!("/collections/{}/documents", collection_id)
}

pub(crate) fn document(collection_id: &str, document_id: &str) -> String {
    format!("/collections/{}/documents/{}", collection_id, document_id)
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body for collection create and update.
#[derive(Debug, Serialize)]
pub(crate) struct CollectionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<&'a str>,
}

/// Body for document create and update.
#[derive(Debug, Serialize)]
pub(crate) struct DocumentRequest<'a> {
    pub data: &'a Map<String, Value>,
}
