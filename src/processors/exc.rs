//! Exception-info rendering processor

use crate::core::{
    BoxError, EventRecord, Level, Processor, ProcessorOutput, Target, Value, EXC_INFO_KEY,
};

/// Renders a captured exception payload into readable text
///
/// Pops the reserved exception key: a captured payload becomes a text
/// field under `exception` (message line plus any source chain); the null
/// sentinel left by an `exception` call with nothing to capture is
/// silently dropped. Records without the key pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct ExceptionFormatter {
    key: Option<String>,
}

impl ExceptionFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the rendered text under a custom key instead of `exception`
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("exception")
    }
}

impl Processor for ExceptionFormatter {
    fn process(
        &self,
        _target: &dyn Target,
        _level: Level,
        mut record: EventRecord,
    ) -> std::result::Result<ProcessorOutput, BoxError> {
        match record.remove(EXC_INFO_KEY) {
            Some(Value::ExcInfo(exc)) => {
                let text = match &exc.backtrace {
                    Some(backtrace) => format!("{}\n{}", exc, backtrace),
                    None => exc.to_string(),
                };
                record.insert(self.key(), text);
            }
            Some(Value::Null) | None => {}
            // Caller supplied something else under the reserved key; keep it
            Some(other) => {
                record.insert(EXC_INFO_KEY, other);
            }
        }
        Ok(ProcessorOutput::Record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, ExcInfo, NullTarget};

    fn record_with(exc: Value) -> EventRecord {
        EventRecord::build(
            &Context::new(),
            Level::Error,
            "boom".to_string(),
            &[(EXC_INFO_KEY, exc)],
        )
    }

    fn run(record: EventRecord) -> EventRecord {
        match ExceptionFormatter::new()
            .process(&NullTarget, Level::Error, record)
            .unwrap()
        {
            ProcessorOutput::Record(r) => r,
            other => panic!("expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_renders_captured_payload() {
        let out = run(record_with(Value::from(
            ExcInfo::new("IoError", "disk gone").with_backtrace("caused by: usb unplugged"),
        )));

        assert!(!out.contains_key(EXC_INFO_KEY));
        assert_eq!(
            out.get("exception").and_then(|v| v.as_str()),
            Some("IoError: disk gone\ncaused by: usb unplugged")
        );
    }

    #[test]
    fn test_drops_null_sentinel() {
        let out = run(record_with(Value::Null));

        assert!(!out.contains_key(EXC_INFO_KEY));
        assert!(!out.contains_key("exception"));
    }

    #[test]
    fn test_record_without_key_passes_through() {
        let record = EventRecord::build(&Context::new(), Level::Error, "ok".to_string(), &[]);
        let out = run(record);

        assert!(!out.contains_key("exception"));
        assert_eq!(out.message(), Some("ok"));
    }
}
