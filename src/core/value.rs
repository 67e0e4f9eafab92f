//! Field values carried by contexts and event records
//!
//! This module provides:
//! - `Value`: the value type for structured fields
//! - `ExcInfo`: an opaque captured-exception payload
//! - `ExcInfoCapture`: the hook supplying exception info for `exception` calls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    ExcInfo(ExcInfo),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::ExcInfo(e) => write!(f, "{}", e),
        }
    }
}

impl Value {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::ExcInfo(e) => serde_json::json!({
                "kind": e.kind,
                "message": e.message,
                "backtrace": e.backtrace,
            }),
        }
    }

    /// View as a string slice if this value holds text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ExcInfo> for Value {
    fn from(e: ExcInfo) -> Self {
        Value::ExcInfo(e)
    }
}

/// Captured exception information
///
/// The core treats this as an opaque payload: it is attached to an event
/// record under the reserved exception key and handed through the processor
/// chain unchanged. Rendering it is a processor's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcInfo {
    /// The error's kind or type name
    pub kind: String,
    /// The error's message
    pub message: String,
    /// Optional backtrace-like text, including any source chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl ExcInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Capture an error's type name, message, and source chain
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        let backtrace = if chain.is_empty() {
            None
        } else {
            Some(
                chain
                    .iter()
                    .map(|c| format!("caused by: {}", c))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };

        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            backtrace,
        }
    }
}

impl fmt::Display for ExcInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Hook supplying exception info for `exception`/`aexception` calls
///
/// Supplied at logger construction. When an exception-logging call carries
/// no explicit exception payload, the logger asks this hook for the
/// currently active one; `None` means there is none, and the logger attaches
/// a null sentinel instead of failing.
pub trait ExcInfoCapture: Send + Sync {
    fn capture(&self) -> Option<ExcInfo>;
}

/// Default capture hook: reports no active exception
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveExc;

impl ExcInfoCapture for NoActiveExc {
    fn capture(&self) -> Option<ExcInfo> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(Value::from(7).to_json_value(), serde_json::json!(7));
        assert_eq!(Value::Null.to_json_value(), serde_json::Value::Null);
        assert_eq!(
            Value::from("x").to_json_value(),
            serde_json::Value::String("x".to_string())
        );
    }

    #[test]
    fn test_exc_info_from_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let exc = ExcInfo::from_error(&io_err);

        assert!(exc.kind.contains("io::error::Error") || exc.kind.contains("io::Error"));
        assert_eq!(exc.message, "missing file");
        assert!(exc.backtrace.is_none());
    }

    #[test]
    fn test_exc_info_source_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer failed")]
        struct Outer {
            #[source]
            source: std::io::Error,
        }

        let err = Outer {
            source: std::io::Error::new(std::io::ErrorKind::Other, "inner cause"),
        };
        let exc = ExcInfo::from_error(&err);

        assert_eq!(exc.message, "outer failed");
        assert_eq!(exc.backtrace.as_deref(), Some("caused by: inner cause"));
    }

    #[test]
    fn test_default_capture_reports_nothing() {
        assert!(NoActiveExc.capture().is_none());
    }
}
