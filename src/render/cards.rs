//! Order cards: a compact human-readable summary of each order.

use chrono::{DateTime, NaiveDate};
use htmlentity::entity::{CharacterSet, EncodeType, ICodedDataTrait, encode};
use std::fmt::Write;

use crate::document::{DocumentValue, Scalar};
use crate::error::{OrderDeskError, Result};

const MISSING: &str = "N/A";
const NO_ORDERS: &str = "No orders found.";

/// The fields shown on an order card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderCard {
    pub display_number: Option<String>,
    pub order_type: Option<String>,
    pub id: Option<String>,
    pub bl_number: Option<String>,
    pub delivery_mode: Option<String>,
    pub license_plate: Option<String>,
    pub transporter: Option<String>,
    pub arrival_date: Option<String>,
    pub departure_date: Option<String>,
    pub users_responsible: Option<Vec<String>>,
    pub notes: Option<String>,
    pub custom_fields: Vec<(String, String)>,
}

impl OrderCard {
    pub fn from_order(order: &DocumentValue) -> Self {
        let field = |key: &str| order.get(key).and_then(present_text);
        let date = |key: &str| field(key).map(|raw| format_date(&raw));

        let users_responsible = order.get("usersResponsible").and_then(|users| match users {
            DocumentValue::Sequence(items) => Some(
                items
                    .iter()
                    .map(|u| u.scalar_text().unwrap_or_default())
                    .collect(),
            ),
            other => present_text(other).map(|u| vec![u]),
        });

        let custom_fields = order
            .get("customFields")
            .and_then(DocumentValue::as_sequence)
            .unwrap_or_default()
            .iter()
            .map(|f| {
                let part = |k: &str| f.get(k).and_then(DocumentValue::scalar_text).unwrap_or_default();
                (part("key"), part("value"))
            })
            .collect();

        Self {
            display_number: field("displayNumber"),
            order_type: field("type"),
            id: field("id"),
            bl_number: field("blNumber"),
            delivery_mode: field("orderDeliveryMode"),
            license_plate: field("licensePlate"),
            transporter: field("transporterName"),
            arrival_date: date("arrivalDate"),
            departure_date: date("departureDate"),
            users_responsible,
            notes: field("notes"),
            custom_fields,
        }
    }

    /// Labelled detail rows, with fallbacks applied.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        vec![
            ("ID", or_missing(&self.id)),
            ("BL Number", or_missing(&self.bl_number)),
            ("Delivery Mode", or_missing(&self.delivery_mode)),
            ("License Plate", or_missing(&self.license_plate)),
            ("Transporter", or_missing(&self.transporter)),
            ("Arrival Date", or_missing(&self.arrival_date)),
            ("Departure Date", or_missing(&self.departure_date)),
            (
                "Responsible Users",
                self.users_responsible
                    .as_ref()
                    .map(|u| u.join(", "))
                    .unwrap_or_else(|| "None".to_string()),
            ),
        ]
    }

    pub fn title(&self) -> &str {
        self.display_number.as_deref().unwrap_or(MISSING)
    }

    pub fn badge(&self) -> &str {
        self.order_type.as_deref().unwrap_or("Unknown")
    }
}

/// One card per order in the response.
pub fn cards(value: &DocumentValue) -> Vec<OrderCard> {
    value.orders().iter().map(OrderCard::from_order).collect()
}

/// Render cards as an HTML fragment. All text is entity-encoded.
pub fn render_html(value: &DocumentValue) -> Result<String> {
    let cards = cards(value);
    if cards.is_empty() {
        return Ok(format!("<p>{}</p>\n", NO_ORDERS));
    }

    let mut out = String::new();
    for card in &cards {
        let _ = writeln!(out, r#"<div class="order-card">"#);
        let _ = writeln!(
            out,
            r#"  <div class="order-card-header"><span class="order-number">{}</span><span class="order-type">{}</span></div>"#,
            encode_html(card.title())?,
            encode_html(card.badge())?
        );
        let _ = writeln!(out, r#"  <div class="order-card-details">"#);
        for (label, value) in card.details() {
            let _ = writeln!(
                out,
                r#"    <div><span class="label">{}:</span> {}</div>"#,
                label,
                encode_html(&value)?
            );
        }
        let _ = writeln!(out, "  </div>");
        if let Some(notes) = &card.notes {
            let _ = writeln!(
                out,
                r#"  <div class="order-notes"><span class="label">Notes:</span> {}</div>"#,
                encode_html(notes)?
            );
        }
        if !card.custom_fields.is_empty() {
            let _ = write!(out, r#"  <div class="order-custom-fields"><span class="label">Custom Fields:</span>"#);
            for (key, value) in &card.custom_fields {
                let _ = write!(
                    out,
                    r#" <span class="custom-field">{}: {}</span>"#,
                    encode_html(key)?,
                    encode_html(value)?
                );
            }
            let _ = writeln!(out, "</div>");
        }
        let _ = writeln!(out, "</div>");
    }
    Ok(out)
}

/// Render cards as plain text for terminals.
pub fn render_text(value: &DocumentValue) -> String {
    let cards = cards(value);
    if cards.is_empty() {
        return format!("{}\n", NO_ORDERS);
    }

    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "== {} [{}]", card.title(), card.badge());
        for (label, value) in card.details() {
            let _ = writeln!(out, "  {:<18} {}", format!("{}:", label), value);
        }
        if let Some(notes) = &card.notes {
            let _ = writeln!(out, "  {:<18} {}", "Notes:", notes);
        }
        for (key, value) in &card.custom_fields {
            let _ = writeln!(out, "  * {}: {}", key, value);
        }
    }
    out
}

/// Scalar text, treating null, empty strings, `false` and zero as absent.
fn present_text(value: &DocumentValue) -> Option<String> {
    match value {
        DocumentValue::Scalar(Scalar::String(s)) if s.is_empty() => None,
        DocumentValue::Scalar(Scalar::Bool(false)) => None,
        DocumentValue::Scalar(Scalar::Number(n)) if n.as_f64() == Some(0.0) => None,
        DocumentValue::Scalar(s) => Some(s.to_text()),
        _ => None,
    }
}

/// `YYYY-MM-DD` for RFC 3339 timestamps and plain dates, raw text otherwise.
fn format_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn encode_html(text: &str) -> Result<String> {
    encode(text.as_bytes(), &EncodeType::NamedOrHex, &CharacterSet::Html)
        .to_string()
        .map_err(|e| OrderDeskError::Render(e.to_string()))
}
