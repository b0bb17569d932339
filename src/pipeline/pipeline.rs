use log::{debug, warn};
use serde_json::Value;

use crate::config::InfluxDbConfig;
use crate::error::Result;
use crate::model::Batch;
use crate::output::StorageSink;

use super::transform::RecordTransformer;

/// Outcome of processing one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub written: usize,
    pub dropped: usize,
}

/// Turns one inbound message into exactly one storage write. Records
/// that fail transformation are logged and skipped; they never abort
/// the batch. Write failures propagate to the caller untouched.
pub struct BatchPipeline {
    transformer: RecordTransformer,
    sink: Box<dyn StorageSink>,
    influxdb: InfluxDbConfig,
}

impl BatchPipeline {
    pub fn new(
        transformer: RecordTransformer,
        sink: Box<dyn StorageSink>,
        influxdb: &InfluxDbConfig,
    ) -> Self {
        Self {
            transformer,
            sink,
            influxdb: influxdb.clone(),
        }
    }

    pub fn process(&mut self, message: &[Value]) -> Result<WriteOutcome> {
        debug!("processing a message with {} records", message.len());

        let mut batch = Batch::new(&self.influxdb);
        let mut dropped = 0;

        for record in message {
            match self.transformer.transform(record) {
                Ok(point) => batch.push(point),
                Err(e) if e.is_record_level() => {
                    warn!("dropping record: {}", e);
                    dropped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let outcome = WriteOutcome {
            written: batch.len(),
            dropped,
        };

        self.sink.ensure_database(&self.influxdb.db_name)?;
        self.sink.write(&batch)?;

        debug!(
            "wrote {} points, dropped {} records",
            outcome.written, outcome.dropped
        );
        Ok(outcome)
    }
}
