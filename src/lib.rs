//! # boundlog
//!
//! A structured, context-binding logging core with level filtering and
//! composable processor pipelines.
//!
//! ## Features
//!
//! - **Immutable Contexts**: bind/unbind derive new loggers; instances are
//!   freely shareable across threads with no synchronization
//! - **Cheap Level Gating**: disabled calls short-circuit before any
//!   allocation or processing
//! - **Composable Pipelines**: processors transform each event record and
//!   render it for an opaque output target
//! - **Dual Call Surface**: every severity has a blocking method and a
//!   suspending `a`-prefixed counterpart (feature `async`)
//!
//! ## Quick Start
//!
//! ```
//! use boundlog::prelude::*;
//!
//! let logger = boundlog::default_logger().bind([("service", "api")]);
//!
//! logger.info("server started", &[], &[("port", Value::from(8080))]).unwrap();
//! logger.debug("not shown at the default threshold", &[], &[]).unwrap();
//! ```

pub mod core;
pub mod macros;
pub mod processors;
pub mod targets;

pub mod prelude {
    pub use crate::core::{
        BindableLogger, BoxError, Context, Dispatch, EventRecord, ExcInfo, ExcInfoCapture,
        FilteringLogger, FilteringLoggerBuilder, Level, LogError, NullTarget, Processor,
        ProcessorChain, ProcessorOutput, Rendered, Result, Target, Value, EVENT_KEY, EXC_INFO_KEY,
        LEVEL_KEY,
    };
    pub use crate::processors::{ExceptionFormatter, JsonRenderer, KeyValueRenderer, Timestamper};
    pub use crate::targets::{CaptureTarget, ConsoleTarget, WriteTarget};
}

pub use crate::core::{
    BindableLogger, BoxError, Context, Dispatch, EventRecord, ExcInfo, ExcInfoCapture,
    FilteringLogger, FilteringLoggerBuilder, Level, LogError, NoActiveExc, NullTarget, Processor,
    ProcessorChain, ProcessorOutput, Rendered, Result, Target, Value,
};
pub use crate::processors::{
    ExceptionFormatter, JsonRenderer, KeyValueRenderer, TimestampFormat, Timestamper,
};
pub use crate::targets::{CaptureTarget, ConsoleTarget, WriteTarget};

#[cfg(feature = "console")]
pub use crate::processors::ConsoleRenderer;

/// A ready-to-use logger: timestamps, key=value rendering, console output
///
/// The pipeline equivalent of wiring the builder by hand:
///
/// ```
/// use boundlog::prelude::*;
///
/// let logger = FilteringLogger::builder()
///     .min_level(Level::Info)
///     .processor(Timestamper::new())
///     .processor(KeyValueRenderer::new())
///     .target(ConsoleTarget::new())
///     .build();
/// ```
pub fn default_logger() -> FilteringLogger {
    FilteringLogger::builder()
        .min_level(Level::Info)
        .processor(Timestamper::new())
        .processor(KeyValueRenderer::new())
        .target(ConsoleTarget::new())
        .build()
}
