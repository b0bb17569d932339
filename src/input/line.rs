use std::io::BufRead;

use crate::error::{Error, Result};

use super::source::Message;

/// Message source decoding one JSON array of records per input line.
/// Doubles as the test harness and as a stand-in for a queue consumer.
pub struct JsonLineSource<R> {
    inner: R,
    delim: u8,
}

impl<R: BufRead> JsonLineSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            delim: b'\n',
        }
    }

    pub fn with_delimiter(inner: R, delim: u8) -> Self {
        Self { inner, delim }
    }
}

impl<R: BufRead> std::iter::Iterator for JsonLineSource<R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = Vec::new();
            match self.inner.read_until(self.delim, &mut buf) {
                Ok(0) => return None, // EOF
                Ok(_) => (),
                Err(e) => return Some(Err(Error::SourceIo(e))),
            };

            if buf.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }

            return Some(serde_json::from_slice(&buf).map_err(Error::MessageDecoding));
        }
    }
}
