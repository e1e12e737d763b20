//! Order API relay handlers.
//!
//! Each route forwards to the upstream API with the stored credentials and
//! renders the answer in the requested format.

use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::OrderSearch;
use crate::document::DocumentValue;
use crate::render::{OutputFormat, Rendered, render};

use super::super::state::AppState;
use super::ApiError;

/// Response header carrying the number of orders in a payload.
pub const ORDER_COUNT_HEADER: &str = "x-order-count";

/// Presentation options shared by every order route.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub download: bool,
}

/// Query for `GET /api/orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub display_number: Option<String>,
    pub subsidiary: Option<String>,
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub download: bool,
}

/// Query for `GET /api/documents`.
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    pub link: String,
}

/// GET /api/orders - list all orders, or search when criteria are given.
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let client = state.client().await?;
    let search = OrderSearch {
        display_number: query.display_number,
        subsidiary: query.subsidiary,
    };

    let value = if search.is_empty() {
        client.list_orders().await?
    } else {
        client.search_orders(&search).await?
    };

    let view = ViewQuery {
        format: query.format,
        download: query.download,
    };
    respond(value, &view)
}

/// GET /api/orders/:id - a single order.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    view: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(view) = view?;
    let value = state.client().await?.get_order(&order_id).await?;
    respond(value, &view)
}

/// GET /api/orders/:id/lines/:line_type - lines of one type for an order.
pub async fn lines(
    State(state): State<Arc<AppState>>,
    Path((order_id, line_type)): Path<(String, String)>,
    view: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(view) = view?;
    let value = state
        .client()
        .await?
        .order_lines(&order_id, &line_type)
        .await?;
    respond(value, &view)
}

/// GET /api/documents?link=... - proxy a document download.
pub async fn document(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DocumentQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let doc = state.client().await?.download_document(&query.link).await?;
    let disposition = attachment(&doc.filename)?;
    let content_type = HeaderValue::from_str(&doc.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.bytes,
    )
        .into_response())
}

fn respond(value: Value, view: &ViewQuery) -> Result<Response, ApiError> {
    let doc = DocumentValue::from(value);
    let rendered = render(&doc, view.format.unwrap_or_default())?;
    rendered_response(rendered, view.download, doc.collection_len())
}

/// Build a response for a rendered payload, optionally as an attachment.
pub(super) fn rendered_response(
    rendered: Rendered,
    download: bool,
    order_count: usize,
) -> Result<Response, ApiError> {
    let filename = rendered.filename();
    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static(rendered.mime()))],
        rendered.body,
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(ORDER_COUNT_HEADER),
        HeaderValue::from(order_count),
    );
    if download {
        headers.insert(header::CONTENT_DISPOSITION, attachment(&filename)?);
    }
    Ok(response)
}

fn attachment(filename: &str) -> Result<HeaderValue, ApiError> {
    let filename = filename.replace(['"', '\\'], "_");
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename)).map_err(|_| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid download filename: {}", filename),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rendered_response_headers() {
        let doc = DocumentValue::from(json!([{"id": 1}, {"id": 2}]));
        let rendered = render(&doc, OutputFormat::Xml).unwrap();
        let response = rendered_response(rendered, true, doc.collection_len()).unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/xml");
        assert_eq!(headers[ORDER_COUNT_HEADER], "2");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"orders_response.xml\""
        );
    }

    #[test]
    fn test_no_disposition_without_download() {
        let doc = DocumentValue::from(json!({"id": 1}));
        let rendered = render(&doc, OutputFormat::Json).unwrap();
        let response = rendered_response(rendered, false, 1).unwrap();
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    }
}
