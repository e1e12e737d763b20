//! # Order API Client
//!
//! Thin bearer-token client for the upstream order-management API.
//!
//! | Call | Request |
//! |------|---------|
//! | [`OrderClient::list_orders`] | `GET {base}/api/v1/orders` |
//! | [`OrderClient::search_orders`] | `GET {base}/api/v1/orders?displayNumber=..&subsidiary=..` |
//! | [`OrderClient::get_order`] | `GET {base}/api/v1/orders/{id}` |
//! | [`OrderClient::order_lines`] | `GET {base}/api/v1/orders/{id}/{line_type}` |
//! | [`OrderClient::fetch_resource`] | `GET {base}/{resource_id}` |
//! | [`OrderClient::download_document`] | `GET {link}` (relative links resolve under base; other origins are refused) |
//!
//! Non-success responses become [`OrderDeskError::Upstream`]. Nothing is
//! retried.

mod documents;

pub use documents::{DocumentLink, DownloadedDocument, extract_documents};

use reqwest::{StatusCode, Url, header};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{OrderDeskError, Result};

/// Path of the orders collection, relative to the base URL.
const ORDERS_PATH: [&str; 3] = ["api", "v1", "orders"];

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Search criteria for the orders collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearch {
    pub display_number: Option<String>,
    pub subsidiary: Option<String>,
}

impl OrderSearch {
    /// Non-empty criteria as query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("displayNumber", self.display_number.as_deref()),
            ("subsidiary", self.subsidiary.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// # Order Client
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl OrderClient {
    pub fn new(config: ApiConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, config))
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the full orders collection.
    pub async fn list_orders(&self) -> Result<Value> {
        let url = self.endpoint(&[])?;
        self.get_json(url).await
    }

    /// Search orders by display number and/or subsidiary.
    pub async fn search_orders(&self, search: &OrderSearch) -> Result<Value> {
        let pairs = search.query_pairs();
        if pairs.is_empty() {
            return Err(OrderDeskError::InvalidRequest(
                "Please enter search criteria".to_string(),
            ));
        }

        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut().extend_pairs(pairs);
        self.get_json(url).await
    }

    /// Fetch a single order.
    pub async fn get_order(&self, order_id: &str) -> Result<Value> {
        let order_id = required(order_id, "Please enter an order ID")?;
        let url = self.endpoint(&[order_id])?;
        self.get_json(url).await
    }

    /// Fetch the lines of one type (e.g. `order-lines`) for an order.
    pub async fn order_lines(&self, order_id: &str, line_type: &str) -> Result<Value> {
        let order_id = required(order_id, "Please enter an order ID")?;
        let line_type = required(line_type, "Please enter an order line type")?;
        let url = self.endpoint(&[order_id, line_type])?;
        self.get_json(url).await
    }

    /// Fetch the resource named by a webhook notification.
    ///
    /// `resource_id` is appended to the base URL as-is, so it may be a plain
    /// id or a relative path.
    pub async fn fetch_resource(&self, resource_id: &str) -> Result<Value> {
        let resource_id = required(resource_id, "Missing resourceId")?;
        let url = parse_url(&format!(
            "{}/{}",
            self.config.api_url,
            resource_id.trim_start_matches('/')
        ))?;

        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    /// Download a document attached to an order.
    pub async fn download_document(&self, link: &str) -> Result<DownloadedDocument> {
        let url = self.document_url(link)?;

        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;
        let response = check_status(response)?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedDocument {
            filename: documents::filename_from_url(&url),
            content_type,
            bytes,
        })
    }

    /// Resolve a document link. Relative links sit under the base path;
    /// absolute links must share the base origin, since the token goes with
    /// the request.
    fn document_url(&self, link: &str) -> Result<Url> {
        let link = required(link, "No document selected")?;
        let base = parse_url(&self.config.api_url)?;

        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(_) => {
                let mut dir = base.clone();
                if !dir.path().ends_with('/') {
                    let path = format!("{}/", dir.path());
                    dir.set_path(&path);
                }
                dir.join(link.trim_start_matches('/')).map_err(|e| {
                    OrderDeskError::InvalidRequest(format!("Invalid document link {}: {}", link, e))
                })?
            }
        };

        if url.origin() != base.origin() {
            return Err(OrderDeskError::InvalidRequest(
                "Document link must point to the API host".to_string(),
            ));
        }
        Ok(url)
    }

    /// `{base}/api/v1/orders/{segments..}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = parse_url(&self.config.api_url)?;
        url.path_segments_mut()
            .map_err(|_| OrderDeskError::Config(format!("Invalid API URL: {}", self.config.api_url)))?
            .pop_if_empty()
            .extend(ORDERS_PATH)
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.api_token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OrderDeskError::InvalidRequest(message.to_string()));
    }
    Ok(value)
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| OrderDeskError::Config(format!("Invalid API URL {}: {}", raw, e)))
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(upstream_error(status))
}

fn upstream_error(status: StatusCode) -> OrderDeskError {
    OrderDeskError::Upstream {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> OrderClient {
        OrderClient::new(
            ApiConfig::new(base, "tok").unwrap(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let c = client("https://acme.test.qbiltrade.com");
        assert_eq!(
            c.endpoint(&[]).unwrap().as_str(),
            "https://acme.test.qbiltrade.com/api/v1/orders"
        );
        assert_eq!(
            c.endpoint(&["42", "order lines"]).unwrap().as_str(),
            "https://acme.test.qbiltrade.com/api/v1/orders/42/order%20lines"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://localhost:8000/tenant/");
        assert_eq!(
            c.endpoint(&["7"]).unwrap().as_str(),
            "http://localhost:8000/tenant/api/v1/orders/7"
        );
    }

    #[test]
    fn test_document_url_resolution() {
        let c = client("http://localhost:8000/tenant");
        let url = |link: &str| c.document_url(link).map(|u| u.to_string());

        assert_eq!(url("/files/a.pdf").unwrap(), "http://localhost:8000/tenant/files/a.pdf");
        assert_eq!(url("files/a.pdf").unwrap(), "http://localhost:8000/tenant/files/a.pdf");
        assert_eq!(url("httpx/a").unwrap(), "http://localhost:8000/tenant/httpx/a");
        assert_eq!(
            url("http://localhost:8000/other/b.pdf").unwrap(),
            "http://localhost:8000/other/b.pdf"
        );
    }

    #[test]
    fn test_document_url_refuses_other_origins() {
        let c = client("http://localhost:8000");
        for link in [
            "http://evil.test/steal",
            "https://localhost:8000/a",
            "http://localhost:9000/a",
            "mailto:ops@example.com",
        ] {
            assert!(
                matches!(c.document_url(link), Err(OrderDeskError::InvalidRequest(_))),
                "{link} should be refused"
            );
        }
        assert!(matches!(c.document_url("  "), Err(OrderDeskError::InvalidRequest(_))));
    }

    #[test]
    fn test_search_query_pairs() {
        let search = OrderSearch {
            display_number: Some(" SO-1 ".to_string()),
            subsidiary: Some("".to_string()),
        };
        assert_eq!(search.query_pairs(), vec![("displayNumber", "SO-1")]);
        assert!(OrderSearch::default().is_empty());
    }

    #[test]
    fn test_upstream_error_message() {
        let err = upstream_error(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_validation_happens_before_network() {
        let c = client("http://127.0.0.1:9");
        let err = c.search_orders(&OrderSearch::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter search criteria");
        let err = c.get_order("  ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter an order ID");
        let err = c.order_lines("1", "").await.unwrap_err();
        assert!(matches!(err, OrderDeskError::InvalidRequest(_)));
    }
}
