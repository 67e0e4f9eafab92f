//! JSON rendering processor

use crate::core::{BoxError, EventRecord, Level, Processor, ProcessorOutput, Rendered, Target};

/// Renders the record as a single JSON object
///
/// The default single-line form is JSONL-friendly and works with the usual
/// log aggregation tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render indented JSON instead of a single line
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Processor for JsonRenderer {
    fn process(
        &self,
        _target: &dyn Target,
        _level: Level,
        record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        Ok(ProcessorOutput::Rendered(Rendered::Text(json)))
    }
}
