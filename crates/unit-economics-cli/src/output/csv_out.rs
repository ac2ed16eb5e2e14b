use serde_json::Value;
use std::io;

use super::{format_value, split_result};

/// Write output as CSV to stdout.
///
/// Sweeps become one row per point; assessments become field/value pairs
/// followed by the recommendation list.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    // field/value pairs and record lists differ in column count
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("rows") {
                write_array_csv(&mut wtr, rows);
            } else {
                let (scalars, lists) = split_result(map);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in scalars {
                    let _ = wtr.write_record([key, &format_value(val)]);
                }
                for (_, items) in lists {
                    write_array_csv(&mut wtr, items);
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
    }
}
