use serde_json::Value;

use crate::error::Result;

/// One decoded inbound message: an ordered sequence of raw records.
pub type Message = Vec<Value>;

/// Boundary with the message queue. The consumer behind it owns
/// acknowledgment and must commit only after the pipeline returns
/// (at-least-once delivery).
pub trait MessageSource: Iterator<Item = Result<Message>> {}

impl<T: Iterator<Item = Result<Message>>> MessageSource for T {}
