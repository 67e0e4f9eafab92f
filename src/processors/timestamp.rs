//! Timestamping processor

use crate::core::{BoxError, EventRecord, Level, Processor, ProcessorOutput, Target, Value};
use chrono::{DateTime, Utc};

/// Timestamp rendering options for [`Timestamper`]
///
/// Text formats produce string values; Unix formats produce integer values
/// so downstream renderers can keep them numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,
    /// Unix timestamp in seconds
    Unix,
    /// Unix timestamp in milliseconds
    UnixMillis,
    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Render a timestamp as a record value
    #[must_use]
    pub fn to_value(&self, datetime: &DateTime<Utc>) -> Value {
        match self {
            TimestampFormat::Iso8601 => {
                Value::String(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            }
            TimestampFormat::Rfc3339 => Value::String(datetime.to_rfc3339()),
            TimestampFormat::Unix => Value::Int(datetime.timestamp()),
            TimestampFormat::UnixMillis => Value::Int(datetime.timestamp_millis()),
            TimestampFormat::Custom(format_str) => {
                Value::String(datetime.format(format_str).to_string())
            }
        }
    }
}

/// Adds the current time to each record
///
/// # Example
///
/// ```
/// use boundlog::processors::{Timestamper, TimestampFormat};
///
/// let step = Timestamper::new().with_format(TimestampFormat::UnixMillis);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timestamper {
    format: TimestampFormat,
    key: Option<String>,
}

impl Timestamper {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }

    /// Store the timestamp under a custom key instead of `timestamp`
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("timestamp")
    }
}

impl Processor for Timestamper {
    fn process(
        &self,
        _target: &dyn Target,
        _level: Level,
        mut record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        record.insert(self.key(), self.format.to_value(&Utc::now()));
        Ok(ProcessorOutput::Record(record))
    }
}
