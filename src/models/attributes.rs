use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category-specific attributes of a listing, keyed by field name.
///
/// Stored as one JSON object column; ordered so the stored blob is stable.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute value as it is written to the `attributes` blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    /// Multi-choice selections or one-per-line text
    Lines(Vec<String>),
    Text(String),
}

impl AttributeValue {
    /// Blank text, an empty list and an unchecked flag count as "not filled in"
    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Text(text) => text.trim().is_empty(),
            AttributeValue::Lines(lines) => lines.is_empty(),
            AttributeValue::Flag(flag) => !flag,
            AttributeValue::Integer(_) | AttributeValue::Decimal(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(n) => Some(*n as f64),
            AttributeValue::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// List view of the value; a scalar becomes a one-element list
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            AttributeValue::Lines(lines) => lines.clone(),
            other if other.is_empty() => Vec::new(),
            other => vec![other.to_string()],
        }
    }

    /// Parse numeric form input, keeping integers integral
    pub fn parse_number(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Some(AttributeValue::Integer(n));
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(AttributeValue::Decimal(n)),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(true) => f.write_str("Yes"),
            AttributeValue::Flag(false) => f.write_str("No"),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Decimal(n) => write!(f, "{n}"),
            AttributeValue::Lines(lines) => f.write_str(&lines.join(", ")),
            AttributeValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Integer(n)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(lines: Vec<String>) -> Self {
        AttributeValue::Lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untagged_values_decode_to_the_narrowest_variant() {
        let attributes: Attributes = serde_json::from_value(json!({
            "year": 2020,
            "bathrooms": 1.5,
            "make": "Toyota",
            "features": ["sunroof", "bluetooth"],
            "negotiable": true
        }))
        .unwrap();

        assert_eq!(attributes["year"], AttributeValue::Integer(2020));
        assert_eq!(attributes["bathrooms"], AttributeValue::Decimal(1.5));
        assert_eq!(attributes["make"], AttributeValue::from("Toyota"));
        assert_eq!(
            attributes["features"],
            AttributeValue::Lines(vec!["sunroof".into(), "bluetooth".into()])
        );
        assert_eq!(attributes["negotiable"], AttributeValue::Flag(true));
    }

    #[test]
    fn integers_serialize_without_a_fraction() {
        let value = serde_json::to_value(AttributeValue::Integer(50_000)).unwrap();
        assert_eq!(value, json!(50000));
    }

    #[test]
    fn parse_number_prefers_integers() {
        assert_eq!(
            AttributeValue::parse_number(" 2020 "),
            Some(AttributeValue::Integer(2020))
        );
        assert_eq!(
            AttributeValue::parse_number("2.5"),
            Some(AttributeValue::Decimal(2.5))
        );
        assert_eq!(AttributeValue::parse_number("two"), None);
        assert_eq!(AttributeValue::parse_number("NaN"), None);
    }

    #[test]
    fn emptiness() {
        assert!(AttributeValue::from("   ").is_empty());
        assert!(AttributeValue::Lines(vec![]).is_empty());
        assert!(AttributeValue::Flag(false).is_empty());
        assert!(!AttributeValue::Integer(0).is_empty());
        assert!(AttributeValue::Flag(false).to_lines().is_empty());
        assert_eq!(AttributeValue::from("x").to_lines(), vec!["x".to_string()]);
    }
}
