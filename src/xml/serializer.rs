//! Structural JSON → XML serialization.

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::document::{DocumentValue, Envelope};

use super::names::TagNamePolicy;

/// XML declaration written at the top of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Root element name used for order payloads.
pub const DEFAULT_ROOT: &str = "orderData";

/// Wrapper element for collection items.
const COLLECTION_TAG: &str = "orders";
/// Element name for each collection item.
const COLLECTION_ITEM_TAG: &str = "order";
/// Element name for elements of nested sequences.
const SEQUENCE_ITEM_TAG: &str = "item";
/// Element name for a top-level scalar or null.
const BARE_VALUE_TAG: &str = "value";

const INDENT: &str = "  ";

/// # XML Serializer
///
/// Turns a [`DocumentValue`] into an indented XML document. Holds only the
/// tag-name policy, so one instance can be shared freely.
///
/// ```
/// use orderdesk::document::DocumentValue;
/// use orderdesk::xml::XmlSerializer;
///
/// let doc = DocumentValue::from(serde_json::json!({"id": 7, "notes": null}));
/// let xml = XmlSerializer::new().serialize(&doc, "orderData");
///
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <orderData>\n  <id>7</id>\n  <notes />\n</orderData>"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer {
    policy: TagNamePolicy,
}

impl XmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: TagNamePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TagNamePolicy {
        self.policy
    }

    /// Serialize `value` under a root element named `root_name`.
    pub fn serialize(&self, value: &DocumentValue, root_name: &str) -> String {
        let mut out = String::new();
        // fmt::Write for String never fails
        let _ = self.write_xml(&mut out, value, root_name);
        out
    }

    /// Write the document to any `fmt::Write` sink.
    ///
    /// The output ends with the root close tag, without a trailing newline.
    pub fn write_xml<W: Write>(
        &self,
        out: &mut W,
        value: &DocumentValue,
        root_name: &str,
    ) -> fmt::Result {
        let root = self.policy.apply(root_name);
        writeln!(out, "{XML_DECLARATION}")?;
        writeln!(out, "<{root}>")?;

        match value.envelope() {
            Envelope::Sequence(items) | Envelope::WrappedCollection { member: items } => {
                writeln!(out, "{INDENT}<{COLLECTION_TAG}>")?;
                for item in items {
                    self.convert(out, item, COLLECTION_ITEM_TAG, 2)?;
                }
                writeln!(out, "{INDENT}</{COLLECTION_TAG}>")?;
            }
            Envelope::PlainMapping(entries) => {
                for (key, child) in entries {
                    self.convert(out, child, key, 1)?;
                }
            }
            Envelope::Bare(bare) => self.convert(out, bare, BARE_VALUE_TAG, 1)?,
        }

        write!(out, "</{root}>")
    }

    fn convert<W: Write>(
        &self,
        out: &mut W,
        value: &DocumentValue,
        tag: &str,
        level: usize,
    ) -> fmt::Result {
        let tag = self.policy.apply(tag);
        let pad = INDENT.repeat(level);

        match value {
            DocumentValue::Null => writeln!(out, "{pad}<{tag} />"),
            DocumentValue::Scalar(scalar) => {
                let text = scalar.to_text();
                writeln!(out, "{pad}<{tag}>{}</{tag}>", escape_text(&text))
            }
            DocumentValue::Sequence(items) => {
                writeln!(out, "{pad}<{tag}>")?;
                for item in items {
                    self.convert(out, item, SEQUENCE_ITEM_TAG, level + 1)?;
                }
                writeln!(out, "{pad}</{tag}>")
            }
            DocumentValue::Mapping(entries) => {
                writeln!(out, "{pad}<{tag}>")?;
                for (key, child) in entries {
                    self.convert(out, child, key, level + 1)?;
                }
                writeln!(out, "{pad}</{tag}>")
            }
        }
    }
}

/// Escape `&`, `<` and `>` in element text. Nothing else is touched.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Serialize with the default (verbatim) tag-name policy.
pub fn to_xml(value: &DocumentValue, root_name: &str) -> String {
    XmlSerializer::new().serialize(value, root_name)
}

/// Serialize a `serde_json::Value` with the default policy.
pub fn json_to_xml(value: &serde_json::Value, root_name: &str) -> String {
    to_xml(&DocumentValue::from(value), root_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn xml(value: serde_json::Value) -> String {
        json_to_xml(&value, DEFAULT_ROOT)
    }

    #[test]
    fn test_top_level_array_is_wrapped() {
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<orderData>
  <orders>
    <order>
      <id>1</id>
    </order>
    <order>
      <id>2</id>
    </order>
  </orders>
</orderData>";
        assert_eq!(xml(json!([{"id": 1}, {"id": 2}])), expected);
    }

    #[test]
    fn test_hydra_member_drops_siblings() {
        let wrapped = xml(json!({
            "@context": "/api/contexts/Order",
            "hydra:member": [{"id": 5}],
            "hydra:totalItems": 1
        }));
        assert_eq!(wrapped, xml(json!([{"id": 5}])));
        assert!(!wrapped.contains("totalItems"));
    }

    #[test]
    fn test_plain_mapping_has_no_wrapper() {
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<orderData>
  <id>7</id>
  <notes />
</orderData>";
        assert_eq!(xml(json!({"id": 7, "notes": null})), expected);
    }

    #[test]
    fn test_nested_sequence_uses_item() {
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<orderData>
  <usersResponsible>
    <item>ann</item>
    <item />
    <item>
      <item>1</item>
    </item>
  </usersResponsible>
</orderData>";
        assert_eq!(xml(json!({"usersResponsible": ["ann", null, [1]]})), expected);
    }

    #[test]
    fn test_empty_containers() {
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<orderData>
  <x>
  </x>
  <y>
  </y>
</orderData>";
        assert_eq!(xml(json!({"x": [], "y": {}})), expected);
    }

    #[test]
    fn test_empty_collection() {
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<orderData>
  <orders>
  </orders>
</orderData>";
        assert_eq!(xml(json!([])), expected);
    }

    #[test]
    fn test_empty_mapping_root() {
        assert_eq!(
            xml(json!({})),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<orderData>\n</orderData>"
        );
    }

    #[test]
    fn test_escaping_is_single_pass() {
        assert_eq!(escape_text("a&b<c>d"), "a&amp;b&lt;c&gt;d");
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
        assert_eq!(escape_text(r#"say "hi" 'x'"#), r#"say "hi" 'x'"#);
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_scalar_text_forms() {
        let out = xml(json!({"ok": true, "qty": 3.0, "price": 12.5, "note": "a&b<c>d"}));
        assert!(out.contains("  <ok>true</ok>\n"));
        assert!(out.contains("  <qty>3</qty>\n"));
        assert!(out.contains("  <price>12.5</price>\n"));
        assert!(out.contains("  <note>a&amp;b&lt;c&gt;d</note>\n"));
    }

    #[test]
    fn test_bare_values() {
        assert_eq!(
            xml(json!(null)),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<orderData>\n  <value />\n</orderData>"
        );
        assert_eq!(
            xml(json!("x<y")),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<orderData>\n  <value>x&lt;y</value>\n</orderData>"
        );
    }

    #[test]
    fn test_verbatim_keys_are_not_rewritten() {
        let out = xml(json!({"unit price": 1}));
        assert!(out.contains("<unit price>1</unit price>"));
    }

    #[test]
    fn test_sanitize_policy() {
        let doc = DocumentValue::from(json!({"unit price": 1, "2024": {"@id": "x"}}));
        let out = XmlSerializer::with_policy(TagNamePolicy::Sanitize).serialize(&doc, "order data");
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<order_data>
  <unit_price>1</unit_price>
  <_2024>
    <_id>x</_id>
  </_2024>
</order_data>";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_deep_nesting_indentation() {
        let out = xml(json!({"a": {"b": {"c": {"d": 1}}}}));
        assert!(out.contains("\n        <d>1</d>\n"));
        assert!(out.contains("\n      </c>\n"));
    }

    #[test]
    fn test_serializer_is_reusable() {
        let serializer = XmlSerializer::new();
        let doc = DocumentValue::from(json!({"id": 1}));
        assert_eq!(serializer.serialize(&doc, "a"), serializer.serialize(&doc, "a"));
    }
}
