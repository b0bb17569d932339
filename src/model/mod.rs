mod batch;
mod point;
mod timestamp;

pub use batch::Batch;
pub use point::{FieldSet, FieldValue, MetricPoint, TagSet};
pub use timestamp::{to_nanos, to_rfc3339, Timestamp};
