use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Record-level conditions: cost one record, never the batch.
    #[error("record is missing required field '{0}'")]
    MissingField(String),

    #[error("malformed timestamp '{value}'")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("timestamp '{0}' is outside the representable nanosecond range")]
    TimestampOutOfRange(String),

    #[error("no matching parser found for metric '{0}'")]
    NoParserFound(String),

    #[error("parser matched metric '{0}' but does not recognize its payload shape")]
    UnrecognizedPayloadShape(String),

    // Configuration conditions: fatal at startup.
    #[error("config file's '{0}' is missing")]
    MissingConfigKey(String),

    #[error("config file's '{key}' is invalid: {reason}")]
    InvalidConfigValue { key: String, reason: String },

    #[error("failed to read config file '{}'", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{}'", path.display())]
    ConfigSyntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Transport conditions: fatal for the current message.
    #[error("storage request failed")]
    Storage(#[from] reqwest::Error),

    #[error("storage returned status {status}: {body}")]
    StorageStatus { status: u16, body: String },

    #[error("message decoding failed")]
    MessageDecoding(#[source] serde_json::Error),

    #[error("message source failed")]
    SourceIo(#[source] io::Error),
}

impl Error {
    /// True for conditions that drop exactly one record from the
    /// current batch; everything else propagates to the caller.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::MalformedTimestamp { .. }
                | Error::TimestampOutOfRange(_)
                | Error::NoParserFound(_)
                | Error::UnrecognizedPayloadShape(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
