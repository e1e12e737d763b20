//! # orderdesk - Order API Relay and XML Converter
//!
//! orderdesk is a small toolkit around a third-party order-management API.
//! It provides:
//!
//! - **XML conversion**: structural JSON → XML for order payloads
//! - **Rendering**: pretty JSON, XML and order cards with download names
//! - **API client**: bearer-token calls to list, search and fetch orders
//! - **Relay server**: web UI, webhook relay and in-memory result cache
//!
//! ## Quick Start
//!
//! ```
//! use orderdesk::xml::json_to_xml;
//!
//! let payload = serde_json::json!([{"id": 1}, {"id": 2}]);
//! let xml = json_to_xml(&payload, "orderData");
//!
//! assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<orderData>\n  <orders>\n"));
//! assert!(xml.ends_with("  </orders>\n</orderData>"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | JSON-like value model and response shapes |
//! | [`xml`] | XML serializer and tag-name policy |
//! | [`render`] | JSON / XML / card output |
//! | [`client`] | Upstream order API client |
//! | [`config`] | API base URL, token and tenant URLs |
//! | [`store`] | In-memory webhook result cache |
//! | [`server`] | axum relay server |
//! | [`error`] | Error types |

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod server;
pub mod store;
pub mod xml;

// Re-exports for convenience
pub use document::DocumentValue;
pub use error::OrderDeskError;
pub use xml::{XmlSerializer, to_xml};
