//! Stock output targets
//!
//! Targets are the opaque sinks at the end of the pipeline; they consume
//! whatever terminal value the processor chain produced and own their own
//! interior mutability.

pub mod capture;
pub mod console;
pub mod write;

pub use capture::CaptureTarget;
pub use console::ConsoleTarget;
pub use write::WriteTarget;
