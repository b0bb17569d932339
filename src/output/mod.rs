mod http;
mod lineproto;
mod sink;

pub use http::HttpSink;
pub use lineproto::encode_batch;
pub use sink::StorageSink;
