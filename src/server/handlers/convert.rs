//! Conversion handlers for payloads the browser already holds.

use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{DocumentLink, extract_documents};
use crate::document::DocumentValue;
use crate::render::{OutputFormat, Rendered, render_with};
use crate::xml::{TagNamePolicy, XmlSerializer};

use super::orders::rendered_response;
use super::ApiError;

/// Query for `POST /api/convert`.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub download: bool,
    /// Rewrite keys that are not legal XML names
    #[serde(default)]
    pub sanitize: bool,
    /// Root element name for XML output
    pub root: Option<String>,
}

/// POST /api/convert - render a posted JSON payload.
pub async fn convert(
    query: Result<Query<ConvertQuery>, QueryRejection>,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let Some(Json(value)) = body else {
        return Err(ApiError::bad_request("Request body must be JSON"));
    };

    let policy = if query.sanitize {
        TagNamePolicy::Sanitize
    } else {
        TagNamePolicy::Verbatim
    };
    let serializer = XmlSerializer::with_policy(policy);
    let doc = DocumentValue::from(value);
    let format = query.format.unwrap_or(OutputFormat::Xml);

    let rendered = match (format, query.root.as_deref().map(str::trim)) {
        (OutputFormat::Xml, Some(root)) if !root.is_empty() => Rendered {
            format,
            body: serializer.serialize(&doc, root),
        },
        _ => render_with(&doc, format, &serializer)?,
    };

    rendered_response(rendered, query.download, doc.collection_len())
}

/// POST /api/documents/extract - list the documents attached to a payload.
pub async fn documents(body: Option<Json<Value>>) -> Result<Json<Vec<DocumentLink>>, ApiError> {
    let Some(Json(value)) = body else {
        return Err(ApiError::bad_request("Request body must be JSON"));
    };
    Ok(Json(extract_documents(&DocumentValue::from(value))))
}
