use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{FieldSet, FieldValue};

use super::parser::PluginParser;

lazy_static! {
    // One namespace per cpu (or 'all'), one leaf per counter, e.g.
    // intel/procfs/cpu/0/user_percentage, intel/procfs/cpu/all/idle_jiffies.
    static ref NAME_RE: Regex =
        Regex::new(r"^intel/procfs/cpu/(all|[0-9]+)/[a-z_]+$").unwrap();
}

/// Parser for the per-cpu procfs collector. Its metric names carry a
/// cpu index parameter, so it is dispatched through the predicate scan.
pub struct CpuParser {}

impl CpuParser {
    pub fn new() -> Self {
        Self {}
    }
}

impl PluginParser for CpuParser {
    fn matches(&self, metric_name: &str) -> bool {
        NAME_RE.is_match(metric_name)
    }

    fn decode_fields(&self, metric_name: &str, payload: &Value) -> Result<FieldSet> {
        let number = match payload {
            Value::Number(n) => n,
            _ => return Err(Error::UnrecognizedPayloadShape(metric_name.to_string())),
        };

        // Percentage counters are floats; raw jiffies are integers.
        let value = if metric_name.ends_with("_percentage") {
            FieldValue::Float(
                number
                    .as_f64()
                    .ok_or_else(|| Error::UnrecognizedPayloadShape(metric_name.to_string()))?,
            )
        } else {
            FieldValue::Int(
                number
                    .as_i64()
                    .ok_or_else(|| Error::UnrecognizedPayloadShape(metric_name.to_string()))?,
            )
        };

        let mut fields = FieldSet::new();
        fields.insert("value".to_string(), value);
        Ok(fields)
    }
}
