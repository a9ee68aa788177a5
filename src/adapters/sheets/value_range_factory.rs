use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

use super::grid::Grid;

pub trait ValueRangeFactory {
    fn from_rows(rows: Grid) -> Self;
    fn from_string_rows<'a, T: Into<Cow<'a, str>> + Clone>(rows: &[Vec<T>]) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: Grid) -> Self {
        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows),
        }
    }

    fn from_string_rows<'a, T: Into<Cow<'a, str>> + Clone>(rows: &[Vec<T>]) -> Self {
        let values: Grid = rows
            .iter()
            .map(|row| row.iter().cloned().map(wrap_value).collect())
            .collect();

        Self::from_rows(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_value() {
        let value = wrap_value("1");
        assert_eq!(value, Value::String("1".to_string()));
    }

    #[test]
    fn test_from_rows_keeps_value_types() {
        let value_range = ValueRange::from_rows(vec![vec![json!("a"), json!(1), json!(2.5)]]);
        assert_eq!(
            value_range.major_dimension,
            Some("ROWS".to_string()),
            "Major dimension should be ROWS"
        );
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![vec![json!("a"), json!(1), json!(2.5)]])
        );
    }

    #[test]
    fn test_from_string_rows() {
        let value_range =
            ValueRange::from_string_rows(&[vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(
            value_range.values,
            Some(vec![
                vec![json!("a"), json!("b")],
                vec![json!("c"), json!("d")]
            ]),
            "Values should keep the row-major layout"
        );
    }
}
