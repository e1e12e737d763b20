//! # Documents
//!
//! The JSON-like value model shared by every renderer.
//!
//! ```
//! use orderdesk::document::{DocumentValue, Envelope};
//!
//! let value: serde_json::Value =
//!     serde_json::from_str(r#"{"hydra:member": [{"id": 5}], "hydra:totalItems": 1}"#).unwrap();
//! let doc = DocumentValue::from(value);
//!
//! assert!(matches!(doc.envelope(), Envelope::WrappedCollection { .. }));
//! assert_eq!(doc.collection_len(), 1);
//! ```

mod envelope;
mod value;

pub use envelope::{Envelope, HYDRA_MEMBER};
pub use value::{DocumentValue, Scalar};
