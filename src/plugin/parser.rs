use serde_json::Value;

use crate::error::Result;
use crate::model::FieldSet;

/// Decoding strategy for one snap collector plugin type. Implementors
/// are stateless beyond their own decoding rules.
pub trait PluginParser {
    /// Tier-2 dispatch predicate for parameterized metric names.
    /// Parsers that rely solely on exact-name registration return false.
    fn matches(&self, metric_name: &str) -> bool;

    /// Decodes the record's raw `data` payload into the field set of
    /// the resulting point. Fails with `UnrecognizedPayloadShape` when
    /// the payload does not have the structure this plugin expects.
    fn decode_fields(&self, metric_name: &str, payload: &Value) -> Result<FieldSet>;
}
