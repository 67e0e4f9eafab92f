//! key=value rendering processor

use crate::core::{
    BoxError, EventRecord, Level, Processor, ProcessorOutput, Rendered, Target, Value,
};
use std::fmt::Write;

/// Renders the record as a logfmt-style `key=value` line
///
/// Keys listed in the key order come first, in that order; everything else
/// follows sorted alphabetically. String values containing whitespace,
/// quotes, or `=` are double-quoted.
///
/// # Example
///
/// ```
/// use boundlog::processors::KeyValueRenderer;
///
/// // timestamp, level, event first; remaining keys sorted
/// let step = KeyValueRenderer::new();
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueRenderer {
    key_order: Vec<String>,
}

impl KeyValueRenderer {
    pub fn new() -> Self {
        Self {
            key_order: vec![
                "timestamp".to_string(),
                "level".to_string(),
                "event".to_string(),
            ],
        }
    }

    /// Replace the leading key order
    #[must_use]
    pub fn with_key_order<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.key_order = keys.into_iter().map(Into::into).collect();
        self
    }

    fn push_pair(line: &mut String, key: &str, value: &Value) {
        if !line.is_empty() {
            line.push(' ');
        }
        match value {
            Value::String(s) if needs_quoting(s) => {
                let _ = write!(line, "{}=\"{}\"", key, s.replace('"', "\\\""));
            }
            other => {
                let _ = write!(line, "{}={}", key, other);
            }
        }
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.contains(|c: char| c.is_whitespace() || c == '"' || c == '=')
}

impl Default for KeyValueRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for KeyValueRenderer {
    fn process(
        &self,
        _target: &dyn Target,
        _level: Level,
        record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        let mut line = String::new();

        for key in &self.key_order {
            if let Some(value) = record.get(key) {
                Self::push_pair(&mut line, key, value);
            }
        }

        let mut rest: Vec<_> = record
            .iter()
            .filter(|(k, _)| !self.key_order.contains(*k))
            .collect();
        rest.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key, value) in rest {
            Self::push_pair(&mut line, key, value);
        }

        Ok(ProcessorOutput::Rendered(Rendered::Text(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, NullTarget};

    fn render(record: EventRecord) -> String {
        match KeyValueRenderer::new()
            .process(&NullTarget, Level::Info, record)
            .unwrap()
        {
            ProcessorOutput::Rendered(Rendered::Text(t)) => t,
            other => panic!("expected rendered text, got {:?}", other),
        }
    }

    #[test]
    fn test_key_order_then_sorted_rest() {
        let record = EventRecord::build(
            &Context::from_pairs([("zeta", 1), ("alpha", 2)]),
            Level::Info,
            "up".to_string(),
            &[],
        );

        assert_eq!(render(record), "level=info event=up alpha=2 zeta=1");
    }

    #[test]
    fn test_quotes_strings_with_spaces() {
        let record = EventRecord::build(
            &Context::new(),
            Level::Info,
            "server started".to_string(),
            &[],
        );

        assert_eq!(render(record), "level=info event=\"server started\"");
    }

    #[test]
    fn test_custom_key_order() {
        let record = EventRecord::build(&Context::new(), Level::Info, "up".to_string(), &[]);

        let out = match KeyValueRenderer::new()
            .with_key_order(["event", "level"])
            .process(&NullTarget, Level::Info, record)
            .unwrap()
        {
            ProcessorOutput::Rendered(Rendered::Text(t)) => t,
            other => panic!("expected rendered text, got {:?}", other),
        };

        assert_eq!(out, "event=up level=info");
    }
}
