use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// # Documentation
/// A column value of a translated attribute in its native type.
///
/// Columns are nullable, so a missing value is modelled as `Option<AttributeValue>::None`
/// by every API that reads or writes attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Text(String),
    Json(serde_json::Value),
}

impl AttributeValue {
    /// Whether the value counts as blank for presence checks.
    ///
    /// Text is blank when empty or whitespace only. JSON is blank when null, an
    /// empty string, an empty array or an empty object. Other types are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            AttributeValue::Text(text) => text.trim().is_empty(),
            AttributeValue::Json(json) => match json {
                serde_json::Value::Null => true,
                serde_json::Value::String(s) => s.trim().is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
                _ => false,
            },
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttributeValue::Boolean(_) => 0,
            AttributeValue::Integer(_) => 1,
            AttributeValue::Decimal(_) => 2,
            AttributeValue::Date(_) => 3,
            AttributeValue::Timestamp(_) => 4,
            AttributeValue::Text(_) => 5,
            AttributeValue::Json(_) => 6,
        }
    }

    /// Total order used for in-memory sorting.
    ///
    /// Values of the same type compare naturally; integers and decimals compare
    /// numerically; any other mix falls back to the type rank. JSON values compare
    /// by their serialized form.
    pub fn compare(&self, other: &AttributeValue) -> Ordering {
        use AttributeValue::*;
        match (self, other) {
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.cmp(b),
            (Integer(a), Decimal(b)) => rust_decimal::Decimal::from(*a).cmp(b),
            (Decimal(a), Integer(b)) => a.cmp(&rust_decimal::Decimal::from(*b)),
            (Date(a), Date(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Json(a), Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Blank check for nullable column values: `None` is blank.
pub fn is_blank_value(value: Option<&AttributeValue>) -> bool {
    value.map_or(true, AttributeValue::is_blank)
}

/// Ordering for nullable column values with absent values first.
pub fn compare_nullable(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(v) => write!(f, "{v}"),
            AttributeValue::Integer(v) => write!(f, "{v}"),
            AttributeValue::Decimal(v) => write!(f, "{v}"),
            AttributeValue::Date(v) => write!(f, "{v}"),
            AttributeValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            AttributeValue::Text(v) => f.write_str(v),
            AttributeValue::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<Decimal> for AttributeValue {
    fn from(value: Decimal) -> Self {
        AttributeValue::Decimal(value)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(value: NaiveDate) -> Self {
        AttributeValue::Date(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Timestamp(value)
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(value: serde_json::Value) -> Self {
        AttributeValue::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_blankness() {
        assert!(AttributeValue::from("").is_blank());
        assert!(AttributeValue::from("  \t").is_blank());
        assert!(!AttributeValue::from("desc-en").is_blank());
    }

    #[test]
    fn test_json_blankness() {
        assert!(AttributeValue::Json(json!(null)).is_blank());
        assert!(AttributeValue::Json(json!([])).is_blank());
        assert!(AttributeValue::Json(json!({})).is_blank());
        assert!(!AttributeValue::Json(json!({"k": 1})).is_blank());
    }

    #[test]
    fn test_non_text_values_are_never_blank() {
        assert!(!AttributeValue::Boolean(false).is_blank());
        assert!(!AttributeValue::Integer(0).is_blank());
        assert!(!AttributeValue::Decimal(Decimal::ZERO).is_blank());
    }

    #[test]
    fn test_is_blank_value_treats_none_as_blank() {
        assert!(is_blank_value(None));
        assert!(!is_blank_value(Some(&AttributeValue::from("x"))));
    }

    #[test]
    fn test_compare_nullable_puts_none_first() {
        let a = AttributeValue::from("A lv");
        let z = AttributeValue::from("Z lv");
        assert_eq!(compare_nullable(None, Some(&a)), Ordering::Less);
        assert_eq!(compare_nullable(Some(&a), Some(&z)), Ordering::Less);
        assert_eq!(compare_nullable(Some(&z), None), Ordering::Greater);
    }

    #[test]
    fn test_serde_is_tagged() {
        let value = AttributeValue::from("12");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!({"type": "text", "value": "12"}));
        let parsed: AttributeValue = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_compare_mixed_numeric() {
        let int = AttributeValue::Integer(2);
        let dec = AttributeValue::Decimal(Decimal::new(25, 1));
        assert_eq!(int.compare(&dec), Ordering::Less);
        assert_eq!(dec.compare(&int), Ordering::Greater);
    }
}
