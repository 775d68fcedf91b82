use crate::data::datatable::{parse_number, DataValue};
use std::cmp::Ordering;

/// How text cells take part in a sort over one column.
///
/// Two text cells always compare lexicographically. Numeric-looking text is
/// read as a number only when the column also holds real numbers, e.g. an
/// edited `"30"` among integer ages. Deciding this once per column keeps the
/// comparison a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrdering {
    Lexical,
    Numeric,
}

impl TextOrdering {
    /// Pick the ordering for a column from the values it holds
    pub fn for_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a DataValue>>,
    {
        let has_numbers = values
            .into_iter()
            .flatten()
            .any(|v| matches!(v, DataValue::Integer(_) | DataValue::Float(_)));
        if has_numbers {
            TextOrdering::Numeric
        } else {
            TextOrdering::Lexical
        }
    }
}

/// Sort class of a cell: blanks, then numbers, then plain text
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Empty,
    Number(f64),
    Text(&'a str),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

fn sort_key(value: Option<&DataValue>, text: TextOrdering) -> SortKey<'_> {
    match value {
        None => SortKey::Empty,
        Some(DataValue::Integer(i)) => SortKey::Number(*i as f64),
        Some(DataValue::Float(f)) => SortKey::Number(*f),
        Some(DataValue::String(s)) if s.trim().is_empty() => SortKey::Empty,
        Some(DataValue::String(s)) => match text {
            TextOrdering::Numeric => match parse_number(s) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(s),
            },
            TextOrdering::Lexical => SortKey::Text(s),
        },
    }
}

/// Compare two DataValues
pub fn compare_datavalues(a: &DataValue, b: &DataValue) -> Ordering {
    compare_optional_datavalues(Some(a), Some(b))
}

/// Compare DataValues with optional values; a missing value sorts like an
/// empty string. Text compares as text.
pub fn compare_optional_datavalues(a: Option<&DataValue>, b: Option<&DataValue>) -> Ordering {
    compare_cells(a, b, TextOrdering::Lexical)
}

/// Compare two cells of one column under the column's text ordering
pub fn compare_cells(a: Option<&DataValue>, b: Option<&DataValue>, text: TextOrdering) -> Ordering {
    let (ka, kb) = (sort_key(a, text), sort_key(b, text));
    match (ka, kb) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => ka.rank().cmp(&kb.rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DataValue {
        DataValue::String(s.to_string())
    }

    #[test]
    fn test_integer_comparison() {
        assert_eq!(
            compare_datavalues(&DataValue::Integer(1), &DataValue::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            compare_datavalues(&DataValue::Integer(2), &DataValue::Integer(2)),
            Ordering::Equal
        );
        assert_eq!(
            compare_datavalues(&DataValue::Integer(3), &DataValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(
            compare_datavalues(&text("apple"), &text("banana")),
            Ordering::Less
        );
        // Uppercase sorts before lowercase, as with a plain `<`
        assert_eq!(compare_datavalues(&text("Zed"), &text("alice")), Ordering::Less);
    }

    #[test]
    fn test_numeric_text_compares_as_text() {
        // Imported CSV cells are all text
        assert_eq!(compare_datavalues(&text("4"), &text("30")), Ordering::Greater);
        assert_eq!(compare_datavalues(&text("100"), &text("25")), Ordering::Less);
    }

    #[test]
    fn test_edited_numbers_compare_numerically() {
        let (seeded, edited) = (DataValue::Integer(25), text("30"));
        let ordering = TextOrdering::for_values([Some(&seeded), Some(&edited)]);
        assert_eq!(ordering, TextOrdering::Numeric);

        assert_eq!(
            compare_cells(Some(&text("30")), Some(&DataValue::Integer(25)), ordering),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(Some(&text("4")), Some(&text("30")), ordering),
            Ordering::Less
        );
        assert_eq!(
            compare_datavalues(&DataValue::Float(29.5), &DataValue::Integer(30)),
            Ordering::Less
        );
    }

    #[test]
    fn test_text_only_column_is_lexical() {
        let (a, b) = (text("100"), text("9"));
        assert_eq!(
            TextOrdering::for_values([Some(&a), None, Some(&b)]),
            TextOrdering::Lexical
        );
    }

    #[test]
    fn test_missing_sorts_as_empty() {
        assert_eq!(
            compare_optional_datavalues(None, Some(&text(""))),
            Ordering::Equal
        );
        assert_eq!(
            compare_optional_datavalues(None, Some(&DataValue::Integer(1))),
            Ordering::Less
        );
        assert_eq!(
            compare_optional_datavalues(Some(&text("a")), None),
            Ordering::Greater
        );
    }

    #[test]
    fn test_cross_class_order() {
        assert_eq!(
            compare_datavalues(&DataValue::Integer(1_000), &text("abc")),
            Ordering::Less
        );
        assert_eq!(
            compare_datavalues(&text("abc"), &DataValue::Float(-3.0)),
            Ordering::Greater
        );
    }
}
