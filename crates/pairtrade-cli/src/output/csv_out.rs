use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// An evaluation report becomes one row per date with the full signal
/// trace; everything else becomes field,value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(report) = value.get("report") {
        if write_report_rows(&mut wtr, report) {
            let _ = wtr.flush();
            return;
        }
    }

    write_flat(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_report_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, report: &Value) -> bool {
    let columns = [
        "dates",
        "spread",
        "z_score",
        "signals",
        "strategy_returns",
        "cumulative_returns",
    ];
    let series: Vec<&Vec<Value>> = match columns
        .iter()
        .map(|c| report.get(c).and_then(|v| v.as_array()))
        .collect::<Option<Vec<_>>>()
    {
        Some(s) => s,
        None => return false,
    };

    let n = series[0].len();
    if series.iter().any(|s| s.len() != n) {
        return false;
    }

    let _ = wtr.write_record([
        "date",
        "spread",
        "z_score",
        "signal",
        "strategy_return",
        "cumulative_return",
    ]);
    for i in 0..n {
        let row: Vec<String> = series.iter().map(|s| format_csv_value(&s[i])).collect();
        let _ = wtr.write_record(&row);
    }
    true
}

fn write_flat(wtr: &mut csv::Writer<io::StdoutLock<'_>>, value: &Value) {
    let _ = wtr.write_record(["field", "value"]);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(inner) => {
                        for (ikey, ival) in inner {
                            let _ = wtr.write_record([
                                format!("{}.{}", key, ikey),
                                format_csv_value(ival),
                            ]);
                        }
                    }
                    _ => {
                        let _ = wtr.write_record([key.clone(), format_csv_value(val)]);
                    }
                }
            }
        }
        _ => {
            let _ = wtr.write_record(["value", &format_csv_value(value)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
