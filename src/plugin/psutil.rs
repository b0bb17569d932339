use std::collections::HashMap;

use lazy_static::lazy_static;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{FieldSet, FieldValue};

use super::parser::PluginParser;

#[derive(Clone, Copy)]
enum FieldKind {
    Float,
    Int,
}

lazy_static! {
    // Metric namespaces published by snap-plugin-collector-psutil,
    // with the value kind each one reports.
    static ref KNOWN_NAMES: HashMap<&'static str, FieldKind> = {
        let mut m = HashMap::new();
        m.insert("intel/psutil/load/load1", FieldKind::Float);
        m.insert("intel/psutil/load/load5", FieldKind::Float);
        m.insert("intel/psutil/load/load15", FieldKind::Float);
        m.insert("intel/psutil/cpu/percent", FieldKind::Float);
        m.insert("intel/psutil/vm/total", FieldKind::Int);
        m.insert("intel/psutil/vm/available", FieldKind::Int);
        m.insert("intel/psutil/vm/used", FieldKind::Int);
        m.insert("intel/psutil/vm/free", FieldKind::Int);
        m.insert("intel/psutil/vm/percent", FieldKind::Float);
        m.insert("intel/psutil/net/all/bytes_sent", FieldKind::Int);
        m.insert("intel/psutil/net/all/bytes_recv", FieldKind::Int);
        m.insert("intel/psutil/net/all/packets_sent", FieldKind::Int);
        m.insert("intel/psutil/net/all/packets_recv", FieldKind::Int);
        m
    };
}

/// Parser for the psutil collector. All of its metric names are fixed,
/// so it is dispatched through the exact-name tier only.
pub struct PsutilParser {}

impl PsutilParser {
    pub fn new() -> Self {
        Self {}
    }

    /// The exact metric names to register this parser under.
    pub fn known_names(&self) -> impl Iterator<Item = &'static str> {
        KNOWN_NAMES.keys().copied()
    }
}

impl PluginParser for PsutilParser {
    fn matches(&self, _metric_name: &str) -> bool {
        false
    }

    fn decode_fields(&self, metric_name: &str, payload: &Value) -> Result<FieldSet> {
        let kind = KNOWN_NAMES
            .get(metric_name)
            .ok_or_else(|| Error::UnrecognizedPayloadShape(metric_name.to_string()))?;

        let value = match (kind, payload) {
            (FieldKind::Float, Value::Number(n)) => {
                // Integral samples of a float metric are fine.
                FieldValue::Float(
                    n.as_f64()
                        .ok_or_else(|| Error::UnrecognizedPayloadShape(metric_name.to_string()))?,
                )
            }
            (FieldKind::Int, Value::Number(n)) => FieldValue::Int(
                n.as_i64()
                    .ok_or_else(|| Error::UnrecognizedPayloadShape(metric_name.to_string()))?,
            ),
            _ => return Err(Error::UnrecognizedPayloadShape(metric_name.to_string())),
        };

        let mut fields = FieldSet::new();
        fields.insert("value".to_string(), value);
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_decode_float_metric() -> Result<()> {
        let parser = PsutilParser::new();
        let fields = parser.decode_fields("intel/psutil/cpu/percent", &json!(42.5))?;
        assert_eq!(fields.get("value"), Some(&FieldValue::Float(42.5)));

        // An integral sample still decodes as a float.
        let fields = parser.decode_fields("intel/psutil/load/load1", &json!(2))?;
        assert_eq!(fields.get("value"), Some(&FieldValue::Float(2.0)));
        Ok(())
    }

    #[test]
    fn test_decode_int_metric() -> Result<()> {
        let parser = PsutilParser::new();
        let fields = parser.decode_fields("intel/psutil/vm/available", &json!(8589934592u64))?;
        assert_eq!(fields.get("value"), Some(&FieldValue::Int(8589934592)));
        Ok(())
    }

    #[test]
    fn test_unrecognized_payload_shape() {
        let parser = PsutilParser::new();

        for payload in &[json!("42.5"), json!(null), json!({"value": 1}), json!([1])] {
            match parser.decode_fields("intel/psutil/cpu/percent", payload) {
                Err(Error::UnrecognizedPayloadShape(name)) => {
                    assert_eq!(name, "intel/psutil/cpu/percent")
                }
                other => panic!("expected UnrecognizedPayloadShape, got {:?}", other),
            }
        }

        // A float sample of an integer metric is a shape violation too.
        assert!(parser
            .decode_fields("intel/psutil/vm/used", &json!(1.5))
            .is_err());

        // Known-name bookkeeping and the exact-match registration may
        // disagree only through a bug; treat it as a payload error.
        assert!(parser.decode_fields("intel/psutil/bogus", &json!(1)).is_err());
    }

    #[test]
    fn test_never_matches_by_predicate() {
        let parser = PsutilParser::new();
        assert!(!parser.matches("intel/psutil/cpu/percent"));
    }
}
