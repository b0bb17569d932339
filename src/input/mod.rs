mod line;
mod source;

pub use line::JsonLineSource;
pub use source::{Message, MessageSource};
