use crate::config::{ConsistencyLevel, InfluxDbConfig};

use super::point::MetricPoint;

/// All points derived from one inbound message, written together in a
/// single storage call. Never partially flushed.
#[derive(Debug)]
pub struct Batch {
    database: String,
    retention_policy: String,
    consistency: ConsistencyLevel,
    points: Vec<MetricPoint>,
}

impl Batch {
    pub fn new(conf: &InfluxDbConfig) -> Self {
        Self {
            database: conf.db_name.clone(),
            retention_policy: conf.retention_policy.clone(),
            consistency: conf.consistency_level,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: MetricPoint) {
        self.points.push(point);
    }

    #[inline]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[inline]
    pub fn retention_policy(&self) -> &str {
        &self.retention_policy
    }

    #[inline]
    pub fn consistency(&self) -> ConsistencyLevel {
        self.consistency
    }

    #[inline]
    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
