//! Stock processor steps
//!
//! Every processor here honors the chain contract: transform the record
//! and pass it on, or render it into a terminal value. They are ordinary
//! chain steps with no special standing; supply them to the builder in
//! whatever order fits.

pub mod exc;
pub mod json;
pub mod kv;
pub mod timestamp;

#[cfg(feature = "console")]
pub mod console;

pub use exc::ExceptionFormatter;
pub use json::JsonRenderer;
pub use kv::KeyValueRenderer;
pub use timestamp::{TimestampFormat, Timestamper};

#[cfg(feature = "console")]
pub use console::ConsoleRenderer;
