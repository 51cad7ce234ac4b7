use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

pub trait ValueRangeFactory {
    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![row_values
                .iter()
                .map(|cell| wrap_value(cell.clone()))
                .collect()]),
        }
    }
}

/// Renders a cell as the spreadsheet shows it; empty cells become "".
pub fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_single_row() {
        let value_range = ValueRange::from_single_row(&["TEST", "діагностика", "успішна"]);
        assert_eq!(value_range.major_dimension, Some("ROWS".to_string()));
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![vec![
                Value::String("TEST".to_string()),
                Value::String("діагностика".to_string()),
                Value::String("успішна".to_string()),
            ]])
        );
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(Value::String("Name".to_string())), "Name");
        assert_eq!(cell_to_string(Value::Null), "");
        assert_eq!(cell_to_string(serde_json::json!(42)), "42");
        assert_eq!(cell_to_string(serde_json::json!(true)), "true");
    }
}
