use std::collections::BTreeMap;

use crate::model::{Batch, FieldValue, MetricPoint};

/// Renders a batch as InfluxDB line protocol, one point per line.
/// Tag and field keys are emitted in sorted order so the output is
/// deterministic.
pub fn encode_batch(batch: &Batch) -> String {
    let mut out = String::new();
    for point in batch.points() {
        encode_point(point, &mut out);
        out.push('\n');
    }
    out
}

fn encode_point(point: &MetricPoint, out: &mut String) {
    out.push_str(&escape_measurement(point.measurement()));

    for (key, value) in point.tags().iter().collect::<BTreeMap<_, _>>() {
        out.push(',');
        out.push_str(&escape_tag(key));
        out.push('=');
        out.push_str(&escape_tag(value));
    }

    let mut separator = ' ';
    for (key, value) in point.fields().iter().collect::<BTreeMap<_, _>>() {
        out.push(separator);
        separator = ',';
        out.push_str(&escape_tag(key));
        out.push('=');
        match value {
            FieldValue::Float(v) => out.push_str(&v.to_string()),
            FieldValue::Int(v) => {
                out.push_str(&v.to_string());
                out.push('i');
            }
            FieldValue::Text(v) => {
                out.push('"');
                out.push_str(&v.replace('\\', "\\\\").replace('"', "\\\""));
                out.push('"');
            }
        }
    }

    out.push(' ');
    out.push_str(&point.timestamp().to_string());
}

fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

// Tag keys, tag values, and field keys share one escaping rule.
fn escape_tag(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}
