use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Column name that addresses the record identifier rather than a field
pub const ID_COLUMN: &str = "id";

/// Identifier of a record. Unique within a row set by construction; nothing
/// enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the record at a zero-based position, as assigned by
    /// imports (`"1"`, `"2"`, ...)
    pub fn sequential(index: usize) -> Self {
        Self((index + 1).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single cell value in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Integer(i64),
    Float(f64),
    String(String),
}

impl DataValue {
    /// Numeric reading of the value, following the loose conversion rules of
    /// a browser's `Number()` for text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Integer(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            DataValue::String(s) => parse_number(s),
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, DataValue::String(s) if s.is_empty())
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

/// Parse text the way `Number(text)` does: surrounding whitespace is ignored,
/// blank text is zero, `Infinity` and `0x`/`0o`/`0b` literals are accepted.
/// Returns `None` where the browser would produce `NaN`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        for prefix in prefixes {
            if let Some(digits) = trimmed.strip_prefix(prefix) {
                return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
            }
        }
    }

    // Rust accepts spellings such as "inf" and "NaN" that Number() rejects
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    trimmed.parse::<f64>().ok()
}

/// One row of tabular data: a typed identifier plus an open mapping from
/// column name to value. Columns added after the fact are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RowId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, DataValue>,
}

impl Record {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Stored field value. The identifier is not a field; see [`Record::cell`].
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        self.fields.get(column)
    }

    /// Value of a column as the grid sees it: the `id` column reads the
    /// identifier, everything else reads the field.
    pub fn cell(&self, column: &str) -> Option<Cow<'_, DataValue>> {
        if column == ID_COLUMN {
            return Some(Cow::Owned(DataValue::String(self.id.to_string())));
        }
        self.get(column).map(Cow::Borrowed)
    }

    /// Write a column. Writing `id` replaces the identifier, so the field map
    /// never holds a second `id` key.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<DataValue>) {
        let column = column.into();
        let value = value.into();
        if column == ID_COLUMN {
            self.id = RowId::new(value.to_string());
            return;
        }
        self.fields.insert(column, value);
    }

    /// Text shown for a column; missing fields read as empty
    pub fn display_value(&self, column: &str) -> String {
        if column == ID_COLUMN {
            return self.id.to_string();
        }
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_like_browser() {
        assert_eq!(parse_number("30"), Some(30.0));
        assert_eq!(parse_number("  42.5 "), Some(42.5));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("   "), Some(0.0));
        assert_eq!(parse_number("0x1A"), Some(26.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("thirty"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = Record::new("1")
            .with_field("name", "Alice")
            .with_field("age", 25i64);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "name": "Alice", "age": 25})
        );

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_untagged_values_keep_their_kind() {
        let record: Record =
            serde_json::from_str(r#"{"id":"7","age":"31","score":2.5,"count":3}"#).unwrap();
        assert_eq!(record.get("age"), Some(&DataValue::String("31".into())));
        assert_eq!(record.get("score"), Some(&DataValue::Float(2.5)));
        assert_eq!(record.get("count"), Some(&DataValue::Integer(3)));
    }

    #[test]
    fn test_missing_field_displays_empty() {
        let record = Record::new("1").with_field("name", "Alice");
        assert_eq!(record.display_value("name"), "Alice");
        assert_eq!(record.display_value("department"), "");
    }

    #[test]
    fn test_id_column_addresses_identifier() {
        let mut record = Record::new("2").with_field("name", "Bob");
        assert_eq!(record.display_value("id"), "2");
        assert_eq!(
            record.cell("id").as_deref(),
            Some(&DataValue::String("2".into()))
        );

        record.set("id", "B-2");
        assert_eq!(record.id.as_str(), "B-2");
        assert!(record.get("id").is_none());

        // One "id" key on the wire, so the blob reads back
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json.matches("\"id\"").count(), 1);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
