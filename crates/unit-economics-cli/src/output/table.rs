use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_value, split_result};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_result_tables(result);
                print_envelope_notes(map);
            }
            _ => print_fields(&split_result(map).0),
        },
        _ => println!("{}", format_value(value)),
    }
}

fn print_result_tables(result: &serde_json::Map<String, Value>) {
    let (scalars, lists) = split_result(result);
    print_fields(&scalars);
    for (name, items) in lists {
        println!("\n{}:", name);
        print_records(items);
    }
}

fn print_fields(fields: &[(&str, &Value)]) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.to_string(), colour_health(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_records(items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(colour_health).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Highlight health categories and recommendation statuses.
fn colour_health(value: &Value) -> String {
    let text = format_value(value);
    match text.as_str() {
        "good" | "positive" => text.green().to_string(),
        "fair" | "warning" => text.yellow().to_string(),
        "poor" | "critical" | "unreachable" => text.red().to_string(),
        _ => text,
    }
}
