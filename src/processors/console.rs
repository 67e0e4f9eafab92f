//! Human-oriented console rendering processor

use crate::core::{
    BoxError, EventRecord, Level, Processor, ProcessorOutput, Rendered, Target, EVENT_KEY,
    LEVEL_KEY,
};
use colored::Colorize;
use std::fmt::Write;

/// Renders the record as a colorized, human-readable line
///
/// Layout: optional timestamp, padded level tag, event message, then the
/// remaining fields as sorted `key=value` pairs. Colors can be disabled
/// for dumb terminals or piped output.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    use_colors: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for ConsoleRenderer {
    fn process(
        &self,
        _target: &dyn Target,
        level: Level,
        mut record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        let mut line = String::new();

        if let Some(ts) = record.remove("timestamp") {
            let _ = write!(line, "[{}] ", ts);
        }

        record.remove(LEVEL_KEY);
        let tag = format!("{:8}", level.as_str());
        if self.use_colors {
            let _ = write!(line, "[{}] ", tag.color(level.color_code()));
        } else {
            let _ = write!(line, "[{}] ", tag);
        }

        if let Some(event) = record.remove(EVENT_KEY) {
            let _ = write!(line, "{}", event);
        }

        let mut rest: Vec<_> = record.iter().collect();
        rest.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key, value) in rest {
            let _ = write!(line, " {}={}", key, value);
        }

        Ok(ProcessorOutput::Rendered(Rendered::Text(line)))
    }
}
