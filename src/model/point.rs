use std::collections::HashMap;

use super::timestamp::Timestamp;

pub type TagSet = HashMap<String, String>;
pub type FieldSet = HashMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
    Text(String),
}

/// One time-series data point. Built by the record transformer, owned
/// by the batch until the storage sink takes it for transmission.
#[derive(Debug)]
pub struct MetricPoint {
    measurement: String,
    tags: TagSet,
    fields: FieldSet,
    timestamp: Timestamp,
}

impl MetricPoint {
    pub fn new(measurement: String, tags: TagSet, fields: FieldSet, timestamp: Timestamp) -> Self {
        Self {
            measurement,
            tags,
            fields,
            timestamp,
        }
    }

    #[inline]
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    #[inline]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    #[inline]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
