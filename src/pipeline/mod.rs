mod pipeline;
mod transform;

pub use pipeline::{BatchPipeline, WriteOutcome};
pub use transform::RecordTransformer;
