pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar-ish JSON value for human-facing formats.
///
/// Projections arrive as `{"finite": "1.23"}` or `"unreachable"`; the former
/// is flattened to its number.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(map) if map.len() == 1 && map.contains_key("finite") => {
            format_value(&map["finite"])
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Split a result object into scalar fields and nested record lists
/// (recommendations, sweep rows).
pub fn split_result(
    result: &serde_json::Map<String, Value>,
) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut lists = Vec::new();
    for (key, val) in result {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                lists.push((key.as_str(), items.as_slice()))
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_flattened() {
        assert_eq!(format_value(&json!({ "finite": "28.57" })), "28.57");
        assert_eq!(format_value(&json!("unreachable")), "unreachable");
    }

    #[test]
    fn test_split_result() {
        let value = json!({
            "overall_health": "good",
            "recommendations": [{ "title": "a" }],
            "empty": []
        });
        let (scalars, lists) = split_result(value.as_object().unwrap());
        assert_eq!(scalars.len(), 2);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].0, "recommendations");
    }
}
