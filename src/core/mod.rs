//! Core logging types and traits

pub mod bindable;
pub mod context;
pub mod error;
pub mod event;
pub mod format;
pub mod level;
pub mod logger;
pub mod processor;
pub mod target;
pub mod value;

pub use bindable::BindableLogger;
pub use context::Context;
pub use error::{BoxError, LogError, Result};
pub use event::{EventRecord, EVENT_KEY, EXC_INFO_KEY, LEVEL_KEY};
pub use format::interpolate;
pub use level::Level;
pub use logger::{Dispatch, FilteringLogger, FilteringLoggerBuilder};
pub use processor::{Processor, ProcessorChain, ProcessorOutput, Rendered};
pub use target::{NullTarget, Target};
pub use value::{ExcInfo, ExcInfoCapture, NoActiveExc, Value};
