//! # Rendering
//!
//! Turns a fetched payload into something to show, copy or download.
//!
//! | Format | MIME type | Download name |
//! |--------|-----------|---------------|
//! | json | `application/json` | `orders_response.json` |
//! | xml | `application/xml` | `orders_response.xml` |
//! | cards | `text/html; charset=utf-8` | `orders_response.html` |
//!
//! ## Example
//!
//! ```
//! use orderdesk::document::DocumentValue;
//! use orderdesk::render::{OutputFormat, render};
//!
//! let doc = DocumentValue::from(serde_json::json!([{"id": 1}]));
//! let rendered = render(&doc, OutputFormat::Xml).unwrap();
//!
//! assert_eq!(rendered.mime(), "application/xml");
//! assert_eq!(rendered.filename(), "orders_response.xml");
//! assert!(rendered.body.contains("<order>"));
//! ```

pub mod cards;

use serde::{Deserialize, Deserializer, de};
use std::fmt;
use std::str::FromStr;

use crate::document::DocumentValue;
use crate::error::{OrderDeskError, Result};
use crate::xml::{DEFAULT_ROOT, XmlSerializer};

/// Base name for downloaded responses.
const DOWNLOAD_STEM: &str = "orders_response";

/// How to present a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
    Cards,
}

impl OutputFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Xml => "application/xml",
            OutputFormat::Cards => "text/html; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Cards => "html",
        }
    }

    /// Filename offered when the rendered payload is downloaded.
    pub fn filename(&self) -> String {
        format!("{}.{}", DOWNLOAD_STEM, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Cards => "cards",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            "cards" => Ok(OutputFormat::Cards),
            other => Err(OrderDeskError::InvalidRequest(format!(
                "Unknown format '{}': expected json, xml or cards",
                other
            ))),
        }
    }
}

/// Query strings and JSON bodies accept any case, like [`FromStr`].
impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A rendered payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub format: OutputFormat,
    pub body: String,
}

impl Rendered {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    pub fn filename(&self) -> String {
        self.format.filename()
    }
}

/// Render with the default XML serializer.
pub fn render(value: &DocumentValue, format: OutputFormat) -> Result<Rendered> {
    render_with(value, format, &XmlSerializer::new())
}

/// Render, using `serializer` for XML output.
pub fn render_with(
    value: &DocumentValue,
    format: OutputFormat,
    serializer: &XmlSerializer,
) -> Result<Rendered> {
    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value.to_json())?,
        OutputFormat::Xml => serializer.serialize(value, DEFAULT_ROOT),
        OutputFormat::Cards => cards::render_html(value)?,
    };
    Ok(Rendered { format, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" XML ".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert_eq!("Cards".parse::<OutputFormat>().unwrap(), OutputFormat::Cards);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_deserialize_ignores_case() {
        let format: OutputFormat = serde_json::from_value(json!("XML")).unwrap();
        assert_eq!(format, OutputFormat::Xml);
        let format: OutputFormat = serde_json::from_value(json!("Cards")).unwrap();
        assert_eq!(format, OutputFormat::Cards);

        let err = serde_json::from_value::<OutputFormat>(json!("bogus")).unwrap_err();
        assert!(err.to_string().contains("Unknown format 'bogus'"));
    }

    #[test]
    fn test_display_round_trips() {
        for format in [OutputFormat::Json, OutputFormat::Xml, OutputFormat::Cards] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_download_names() {
        assert_eq!(OutputFormat::Json.filename(), "orders_response.json");
        assert_eq!(OutputFormat::Xml.filename(), "orders_response.xml");
        assert_eq!(OutputFormat::Cards.filename(), "orders_response.html");
    }

    #[test]
    fn test_json_is_pretty_with_two_spaces() {
        let doc = DocumentValue::from(json!({"id": 1, "tags": ["a"]}));
        let rendered = render(&doc, OutputFormat::Json).unwrap();
        assert_eq!(rendered.body, "{\n  \"id\": 1,\n  \"tags\": [\n    \"a\"\n  ]\n}");
        assert_eq!(rendered.mime(), "application/json");
    }

    #[test]
    fn test_xml_uses_order_root() {
        let doc = DocumentValue::from(json!({"id": 1}));
        let rendered = render(&doc, OutputFormat::Xml).unwrap();
        assert!(rendered.body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<orderData>\n"));
        assert!(rendered.body.ends_with("</orderData>"));
    }

    #[test]
    fn test_cards_render_html() {
        let doc = DocumentValue::from(json!([{"displayNumber": "SO-1"}]));
        let rendered = render(&doc, OutputFormat::Cards).unwrap();
        assert!(rendered.body.contains("SO-1"));
        assert_eq!(rendered.mime(), "text/html; charset=utf-8");
    }
}
