use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{to_nanos, MetricPoint, TagSet};
use crate::plugin::ParserRegistry;

/// Turns one raw snap record into a metric point: envelope extraction,
/// metric-name composition, timestamp conversion, parser dispatch,
/// field decoding. Either returns a complete point or fails; partial
/// points are never produced.
pub struct RecordTransformer {
    registry: ParserRegistry,
}

impl RecordTransformer {
    pub fn new(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    pub fn transform(&self, record: &Value) -> Result<MetricPoint> {
        let record = record
            .as_object()
            .ok_or_else(|| Error::MissingField("namespace".to_string()))?;

        // The measurement is the namespace segments joined with '/'.
        let namespace = get(record, "namespace", "namespace")?
            .as_array()
            .ok_or_else(|| Error::MissingField("namespace".to_string()))?;
        let mut segments = Vec::with_capacity(namespace.len());
        for segment in namespace {
            segments.push(segment_value(segment)?);
        }
        let metric_name = segments.join("/");

        let tags_obj = get(record, "tags", "tags")?
            .as_object()
            .ok_or_else(|| Error::MissingField("tags".to_string()))?;
        let source = string_field(tags_obj, "plugin_running_on", "tags.plugin_running_on")?;

        let unit = string_field(record, "Unit_", "Unit_")?;

        let timestamp = string_field(record, "timestamp", "timestamp")?;
        let nanos = to_nanos(&timestamp)?;

        let parser = self.registry.resolve(&metric_name)?;
        let data = get(record, "data", "data")?;
        let fields = parser.decode_fields(&metric_name, data)?;

        let mut tags = TagSet::new();
        tags.insert("source".to_string(), source);
        if !unit.is_empty() {
            // A zero-length tag value breaks downstream query parsing.
            tags.insert("unit".to_string(), unit);
        }

        Ok(MetricPoint::new(metric_name, tags, fields, nanos))
    }
}

fn get<'a>(obj: &'a Map<String, Value>, key: &str, key_path: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| Error::MissingField(key_path.to_string()))
}

fn string_field(obj: &Map<String, Value>, key: &str, key_path: &str) -> Result<String> {
    get(obj, key, key_path)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| Error::MissingField(key_path.to_string()))
}

fn segment_value(segment: &Value) -> Result<String> {
    let value = segment
        .as_object()
        .and_then(|o| o.get("Value"))
        .ok_or_else(|| Error::MissingField("namespace.Value".to_string()))?;
    match value {
        Value::String(s) => Ok(s.clone()),
        // Dynamic namespace elements (cpu indices and the like) may
        // arrive as numbers.
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::MissingField("namespace.Value".to_string())),
    }
}
