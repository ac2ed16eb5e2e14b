use serde_json::Value;

use super::format_value;

/// Print just the headline answer: the overall verdict for an assessment,
/// the first viable value for a sweep.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["overall_health", "first_good_value"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if val.is_null() {
                    println!("none");
                } else {
                    println!("{}", format_value(val));
                }
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
