//! # XML Output
//!
//! Converts fetched payloads into XML documents.
//!
//! ## Shape
//!
//! | Input | Output under the root |
//! |-------|-----------------------|
//! | array | `<orders>` with one `<order>` per element |
//! | `{"hydra:member": [...]}` | same as array; other keys dropped |
//! | object | one element per key |
//! | null / scalar | a single `<value>` element |
//!
//! Inside those, nulls become `<tag />`, arrays list their elements as
//! `<item>`, objects use their keys as element names, and scalars are
//! written as escaped text on one line. Each level indents by two spaces.

mod names;
mod serializer;

pub use names::{TagNamePolicy, is_valid_name, sanitize_name};
pub use serializer::{
    DEFAULT_ROOT, XML_DECLARATION, XmlSerializer, escape_text, json_to_xml, to_xml,
};
