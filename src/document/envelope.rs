//! Top-level shape classification.
//!
//! API responses arrive either as a bare array, as a Hydra collection
//! (`{"hydra:member": [...], "hydra:totalItems": ...}`), or as a single
//! resource. The shape is resolved once here and matched exhaustively by
//! every consumer.

use super::value::DocumentValue;

/// Key under which Hydra collections nest their items.
pub const HYDRA_MEMBER: &str = "hydra:member";

/// The top-level shape of a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// A top-level array.
    Sequence(&'a [DocumentValue]),
    /// A mapping whose `hydra:member` key holds a sequence. Sibling keys
    /// (`hydra:totalItems`, `@context`, ...) are not part of the collection.
    WrappedCollection { member: &'a [DocumentValue] },
    /// Any other mapping.
    PlainMapping(&'a [(String, DocumentValue)]),
    /// A top-level `Null` or scalar.
    Bare(&'a DocumentValue),
}

impl<'a> Envelope<'a> {
    pub fn classify(value: &'a DocumentValue) -> Self {
        match value {
            DocumentValue::Sequence(items) => Envelope::Sequence(items),
            DocumentValue::Mapping(entries) => {
                match value.get(HYDRA_MEMBER).and_then(DocumentValue::as_sequence) {
                    Some(member) => Envelope::WrappedCollection { member },
                    None => Envelope::PlainMapping(entries),
                }
            }
            DocumentValue::Null | DocumentValue::Scalar(_) => Envelope::Bare(value),
        }
    }

    /// The items of a collection, if this is one.
    pub fn collection(&self) -> Option<&'a [DocumentValue]> {
        match *self {
            Envelope::Sequence(items) | Envelope::WrappedCollection { member: items } => {
                Some(items)
            }
            Envelope::PlainMapping(_) | Envelope::Bare(_) => None,
        }
    }
}

impl DocumentValue {
    pub fn envelope(&self) -> Envelope<'_> {
        Envelope::classify(self)
    }

    /// The orders carried by a response: the collection's items, or the
    /// response itself as a single order.
    pub fn orders(&self) -> &[DocumentValue] {
        self.envelope()
            .collection()
            .unwrap_or(std::slice::from_ref(self))
    }

    /// Number of orders in a response: collection length, or 1.
    pub fn collection_len(&self) -> usize {
        self.orders().len()
    }
}
