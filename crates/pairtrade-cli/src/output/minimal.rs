use serde_json::Value;

/// Print just the headline number.
///
/// For an evaluation this is the final cumulative return, or the rejection
/// p-value; for a bare cointegration test, the p-value. Anything else falls
/// back to its first field.
pub fn print_minimal(value: &Value) {
    if let Value::Object(map) = value {
        match map.get("outcome").and_then(|v| v.as_str()) {
            Some("cointegrated") => {
                if let Some(fr) = map
                    .get("report")
                    .and_then(|r| r.get("final_return"))
                    .and_then(|v| v.as_f64())
                {
                    println!("{:.6}", fr);
                    return;
                }
            }
            Some("rejected") => {
                if let Some(p) = map
                    .get("test")
                    .and_then(|t| t.get("p_value"))
                    .and_then(|v| v.as_f64())
                {
                    println!("not cointegrated (p-value {:.4})", p);
                    return;
                }
            }
            _ => {}
        }

        // Bare cointegration test output
        if let Some(p) = map.get("p_value").and_then(|v| v.as_f64()) {
            println!("{:.6}", p);
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(value));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
