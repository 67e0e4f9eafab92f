//! Error types for the logging core

/// Boxed error type used at the processor/target boundary.
///
/// Processors and output targets carry their own error taxonomies; the
/// core passes them through unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Strict `unbind` referenced a key that is not bound
    #[error("key '{key}' is not bound in this context")]
    KeyNotFound { key: String },

    /// Positional-argument interpolation failed against the message template
    #[error("cannot interpolate '{template}': {reason}")]
    FormatMismatch { template: String, reason: String },

    /// A processor or output target failed; propagated unchanged
    #[error(transparent)]
    Downstream(#[from] BoxError),
}

impl LogError {
    /// Create a key-not-found error for a strict unbind
    pub fn key_not_found(key: impl Into<String>) -> Self {
        LogError::KeyNotFound { key: key.into() }
    }

    /// Create a format mismatch error with the offending template
    pub fn format_mismatch(template: impl Into<String>, reason: impl Into<String>) -> Self {
        LogError::FormatMismatch {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a downstream processor/target error without altering it
    pub fn downstream(err: impl Into<BoxError>) -> Self {
        LogError::Downstream(err.into())
    }
}
