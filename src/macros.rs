//! Logging macros for ergonomic call sites
//!
//! These macros wrap the level methods so positional arguments and
//! key/value pairs read naturally. Positional arguments interpolate into
//! the event message with printf-style `%` specifiers; key/value pairs
//! follow after a semicolon.
//!
//! # Examples
//!
//! ```
//! use boundlog::prelude::*;
//! use boundlog::info;
//!
//! let logger = boundlog::default_logger();
//!
//! // Basic logging
//! info!(logger, "server started").unwrap();
//!
//! // With positional interpolation
//! info!(logger, "listening on port %d", 8080).unwrap();
//!
//! // With structured fields
//! info!(logger, "user logged in"; user_id = 42, method = "oauth").unwrap();
//! ```

/// Log at an explicit level, with positional arguments and key/value pairs.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::log_event;
/// log_event!(logger, Level::Info, "simple message").unwrap();
/// log_event!(logger, Level::Error, "error code %d", 500; retries = 3).unwrap();
/// ```
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr, $event:expr $(, $arg:expr)* $(; $($key:ident = $val:expr),+ $(,)?)?) => {
        $logger.log(
            $level,
            $event,
            &[$($crate::core::Value::from($arg)),*],
            &[$($((stringify!($key), $crate::core::Value::from($val))),+)?],
        )
    };
}

/// Log a debug-level event.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::debug;
/// debug!(logger, "entering reconcile loop").unwrap();
/// debug!(logger, "cursor at %d", 42).unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::core::Level::Debug, $($rest)+)
    };
}

/// Log an info-level event.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::info;
/// info!(logger, "application started").unwrap();
/// info!(logger, "processed %d items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::core::Level::Info, $($rest)+)
    };
}

/// Log a warning-level event.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::warning;
/// warning!(logger, "low disk space"; free_mb = 120).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::core::Level::Warning, $($rest)+)
    };
}

/// Log an error-level event.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::error;
/// error!(logger, "failed to connect"; attempts = 3).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::core::Level::Error, $($rest)+)
    };
}

/// Log a critical-level event.
///
/// # Examples
///
/// ```
/// # use boundlog::prelude::*;
/// # let logger = boundlog::default_logger();
/// use boundlog::critical;
/// critical!(logger, "out of memory, shutting down").unwrap();
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::core::Level::Critical, $($rest)+)
    };
}
