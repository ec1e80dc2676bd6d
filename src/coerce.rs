// src/coerce.rs
// Field coercion for the coercing deployment variant. Lossy and best-effort:
// a numeric field that does not parse keeps its cleaned text.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::config::aliases::CanonicalField;
use crate::core::sanitize::normalize_ws;
use crate::records::OfferRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Int(n) => write!(f, "{n}"),
            // keeps the fractional part visible: 10.0, not 10
            FieldValue::Float(x) => write!(f, "{x:?}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Coerce one raw cell. Only `id`, `sale`, `motivationAmount` and
/// `greenProbability` become numbers; other fields come back as
/// whitespace-normalized text.
pub fn coerce(field: CanonicalField, raw: &str) -> FieldValue {
    let text = normalize_ws(raw);
    if field.is_numeric() {
        normalize_number(&text)
    } else {
        FieldValue::Text(text)
    }
}

/// "1 234,5 ₽" → 1234.5, "10%" → 10, "—" → Null, "1.2.3" → Text("1.2.3").
///
/// Integers are `i64`. A digit string outside that range stays as its
/// cleaned text rather than being rounded through a float, so long numeric
/// ids keep every digit (and serialize as JSON strings).
pub fn normalize_number(value: &str) -> FieldValue {
    let mut cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return FieldValue::Null;
    }
    let commas = cleaned.matches(',').count();
    if commas == 1 && !cleaned.contains('.') {
        cleaned = cleaned.replace(',', ".");
    }
    let parsed = if cleaned.contains('.') {
        cleaned.parse::<f64>().ok().map(FieldValue::Float)
    } else {
        cleaned.parse::<i64>().ok().map(FieldValue::Int)
    };
    parsed.unwrap_or(FieldValue::Text(cleaned))
}

/// An offer after coercion, one typed value per canonical field.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedOffer {
    values: Vec<FieldValue>,
}

impl CoercedOffer {
    pub fn get(&self, field: CanonicalField) -> &FieldValue {
        &self.values[field.index()]
    }

    /// Post-coercion text form (what the pair reducer keys on).
    pub fn to_record(&self) -> OfferRecord {
        CanonicalField::ALL
            .into_iter()
            .fold(OfferRecord::new(), |rec, f| rec.with(f, self.get(f).to_string()))
    }
}

impl Serialize for CoercedOffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CanonicalField::COUNT))?;
        for field in CanonicalField::ALL {
            map.serialize_entry(field.name(), self.get(field))?;
        }
        map.end()
    }
}

pub fn coerce_record(record: &OfferRecord) -> CoercedOffer {
    CoercedOffer {
        values: record.iter().map(|(field, raw)| coerce(field, raw)).collect(),
    }
}
