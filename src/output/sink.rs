use crate::error::Result;
use crate::model::Batch;

/// Write side of the adapter. Implemented by the InfluxDB HTTP client
/// and by in-memory recorders in tests.
pub trait StorageSink {
    /// Idempotent; ignored by the server when the database exists.
    fn ensure_database(&mut self, name: &str) -> Result<()>;

    /// Submits one batch. An empty batch is still a valid (no-op) write.
    fn write(&mut self, batch: &Batch) -> Result<()>;
}
