//! Processor-chain contract
//!
//! A processor is one transformation step between an event record and the
//! wrapped output target. Each step receives the target reference, the
//! call's level, and the current record, and returns either an updated
//! record (the chain continues) or a terminal renderable value (the chain
//! stops and remaining steps are skipped). Ordering is caller-defined and
//! strictly sequential; a step is never skipped because of record content.

use super::error::BoxError;
use super::event::EventRecord;
use super::level::Level;
use super::target::Target;
use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// The legal return shapes of one processor step
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorOutput {
    /// An updated record, fed to the next step
    Record(EventRecord),
    /// A terminal renderable value; the chain stops here
    Rendered(Rendered),
}

/// A terminal renderable value consumed by the wrapped output target
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Bytes(Vec<u8>),
    /// An ordered tuple of values, interpreted by the target
    Values(Vec<Value>),
}

impl Rendered {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(s) => write!(f, "{}", s),
            Rendered::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Rendered::Values(vs) => {
                let joined: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
        }
    }
}

/// One step of the processor chain
///
/// Implemented by closures of the matching shape as well, so plain
/// functions can be used as steps.
pub trait Processor: Send + Sync {
    fn process(
        &self,
        target: &dyn Target,
        level: Level,
        record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError>;
}

impl<F> Processor for F
where
    F: Fn(&dyn Target, Level, EventRecord) -> std::result::Result<ProcessorOutput, BoxError>
        + Send
        + Sync,
{
    fn process(
        &self,
        target: &dyn Target,
        level: Level,
        record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        self(target, level, record)
    }
}

/// An ordered, shared, read-only sequence of processor steps
///
/// Cloning shares the steps; the chain itself is never mutated after
/// construction. The driver runs steps in order until one returns a
/// terminal value, then skips the rest. A chain that runs out of steps
/// while still holding a record cannot hand anything renderable to the
/// target, so that is surfaced as an error.
#[derive(Clone, Default)]
pub struct ProcessorChain {
    steps: Arc<Vec<Arc<dyn Processor>>>,
}

impl ProcessorChain {
    pub fn new(steps: Vec<Arc<dyn Processor>>) -> Self {
        Self {
            steps: Arc::new(steps),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the chain to completion, yielding the terminal renderable value
    pub fn run(
        &self,
        target: &dyn Target,
        level: Level,
        record: EventRecord,
    ) -> std::result::Result<Rendered, BoxError> {
        let mut current = record;
        for step in self.steps.iter() {
            match step.process(target, level, current)? {
                ProcessorOutput::Record(next) => current = next,
                ProcessorOutput::Rendered(rendered) => return Ok(rendered),
            }
        }
        Err(format!(
            "processor chain ended without rendering the event record ({} steps)",
            self.steps.len()
        )
        .into())
    }
}

impl fmt::Debug for ProcessorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}
