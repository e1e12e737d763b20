//! The recursive JSON-like value consumed by the renderers.

use serde_json::{Map, Number, Value};

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Canonical text form used for element content.
    ///
    /// Booleans become `true`/`false`. Integral floats below 1e21 print
    /// without a fractional part (`3.0` → `3`), and negative zero prints as `0`.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => number_text(n),
        }
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        // f64's Display never uses exponent notation, so keep it to the
        // range where that matches the usual shortest decimal form.
        Some(f) if f.abs() < 1e21 && f.abs() >= 1e-6 => f.to_string(),
        _ => n.to_string(),
    }
}

/// # Document Value
///
/// `Null | Scalar | Sequence | Mapping`. Mappings keep their entries in
/// source order and hold each key at most once.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DocumentValue {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<DocumentValue>),
    Mapping(Vec<(String, DocumentValue)>),
}

impl DocumentValue {
    /// Build a mapping from key/value pairs. Later duplicates replace earlier
    /// ones in place so keys stay unique.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DocumentValue)>,
    {
        let mut out: Vec<(String, DocumentValue)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        DocumentValue::Mapping(out)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    /// Look up a key in a mapping. `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        match self {
            DocumentValue::Mapping(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DocumentValue]> {
        match self {
            DocumentValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Scalar text, if this is a scalar.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            DocumentValue::Scalar(s) => Some(s.to_text()),
            _ => None,
        }
    }

    /// Convert back into a `serde_json::Value`, keeping mapping order.
    pub fn to_json(&self) -> Value {
        match self {
            DocumentValue::Null => Value::Null,
            DocumentValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            DocumentValue::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            DocumentValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            DocumentValue::Sequence(items) => {
                Value::Array(items.iter().map(DocumentValue::to_json).collect())
            }
            DocumentValue::Mapping(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (k, v) in entries {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

impl From<Value> for DocumentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocumentValue::Null,
            Value::Bool(b) => DocumentValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => DocumentValue::Scalar(Scalar::Number(n)),
            Value::String(s) => DocumentValue::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                DocumentValue::Sequence(items.into_iter().map(DocumentValue::from).collect())
            }
            Value::Object(map) => DocumentValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, DocumentValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for DocumentValue {
    fn from(value: &Value) -> Self {
        DocumentValue::from(value.clone())
    }
}

impl From<&str> for DocumentValue {
    fn from(s: &str) -> Self {
        DocumentValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for DocumentValue {
    fn from(s: String) -> Self {
        DocumentValue::Scalar(Scalar::String(s))
    }
}

impl From<bool> for DocumentValue {
    fn from(b: bool) -> Self {
        DocumentValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for DocumentValue {
    fn from(n: i64) -> Self {
        DocumentValue::Scalar(Scalar::Number(n.into()))
    }
}

impl From<f64> for DocumentValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f)
            .map(|n| DocumentValue::Scalar(Scalar::Number(n)))
            .unwrap_or(DocumentValue::Null)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(items: Vec<DocumentValue>) -> Self {
        DocumentValue::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value: Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let doc = DocumentValue::from(value);
        let DocumentValue::Mapping(entries) = doc else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_number_text() {
        let cases = [
            (json!(7), "7"),
            (json!(-12), "-12"),
            (json!(3.0), "3"),
            (json!(2.5), "2.5"),
            (json!(-0.0), "0"),
            (json!(18446744073709551615u64), "18446744073709551615"),
        ];
        for (value, expected) in cases {
            let doc = DocumentValue::from(value);
            assert_eq!(doc.scalar_text().as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_bool_text() {
        assert_eq!(DocumentValue::from(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(DocumentValue::from(false).scalar_text().as_deref(), Some("false"));
    }

    #[test]
    fn test_to_json_round_trip() {
        let value = json!({"id": 1, "lines": [{"sku": "A"}, null], "ok": true});
        assert_eq!(DocumentValue::from(&value).to_json(), value);
    }

    #[test]
    fn test_mapping_replaces_duplicates() {
        let doc = DocumentValue::mapping([
            ("a", DocumentValue::from(1_i64)),
            ("b", DocumentValue::from(2_i64)),
            ("a", DocumentValue::from(3_i64)),
        ]);
        assert_eq!(doc.get("a"), Some(&DocumentValue::from(3_i64)));
        let DocumentValue::Mapping(entries) = doc else {
            panic!("expected mapping");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "a");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(DocumentValue::from(f64::NAN).is_null());
    }
}
