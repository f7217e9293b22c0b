use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a field/value table.
///
/// Nested objects are flattened into dotted keys; per-date vectors are
/// summarised by their length (the csv format carries the full trace).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(_) => {
            let mut rows = Vec::new();
            flatten("", value, &mut rows);

            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, rendered) in rows {
                builder.push_record([key.as_str(), rendered.as_str()]);
            }
            println!("{}", Table::from(builder));
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, val, rows);
            }
        }
        Value::Array(arr) => {
            rows.push((prefix.to_string(), format!("[{} values]", arr.len())));
        }
        other => rows.push((prefix.to_string(), format_value(other))),
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
