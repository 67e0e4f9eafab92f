//! The per-call event record threaded through the processor chain

use super::context::Context;
use super::level::Level;
use super::value::Value;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Reserved key holding the event message
pub const EVENT_KEY: &str = "event";
/// Reserved key holding the level name
pub const LEVEL_KEY: &str = "level";
/// Reserved key holding captured exception info
pub const EXC_INFO_KEY: &str = "exc_info";

/// A mutable record materialized fresh for every enabled log call
///
/// Built by copying the owning logger's context, then merging in the event
/// message, the call's key/value pairs (which win over context on
/// collision), and the level name. Processors may mutate or replace it
/// destructively; it is discarded once the chain renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventRecord {
    #[serde(flatten)]
    fields: HashMap<String, Value>,
}

impl EventRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a record from a context snapshot, message, and call pairs
    pub fn build(context: &Context, level: Level, event: String, kv: &[(&str, Value)]) -> Self {
        let mut fields: HashMap<String, Value> = context
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fields.insert(EVENT_KEY.to_string(), Value::String(event));
        for (k, v) in kv {
            fields.insert((*k).to_string(), v.clone());
        }
        fields.insert(LEVEL_KEY.to_string(), Value::String(level.as_str().to_string()));
        Self { fields }
    }

    /// The event message, if still present under the reserved key
    pub fn message(&self) -> Option<&str> {
        self.fields.get(EVENT_KEY).and_then(|v| v.as_str())
    }

    /// The level name, if still present under the reserved key
    pub fn level_name(&self) -> Option<&str> {
        self.fields.get(LEVEL_KEY).and_then(|v| v.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Consume the record, yielding its fields
    pub fn into_fields(self) -> HashMap<String, Value> {
        self.fields
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();
        write!(f, "{}", pairs.join(" "))
    }
}

impl FromIterator<(String, Value)> for EventRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_merges_context_event_and_level() {
        let ctx = Context::from_pairs([("service", "x")]);
        let record = EventRecord::build(&ctx, Level::Error, "b".to_string(), &[("code", Value::from(5))]);

        assert_eq!(record.len(), 4);
        assert_eq!(record.message(), Some("b"));
        assert_eq!(record.level_name(), Some("error"));
        assert_eq!(record.get("service").and_then(|v| v.as_str()), Some("x"));
        assert_eq!(record.get("code"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_call_pairs_win_over_context() {
        let ctx = Context::from_pairs([("user", "from-context")]);
        let record = EventRecord::build(
            &ctx,
            Level::Info,
            "login".to_string(),
            &[("user", Value::from("from-call"))],
        );

        assert_eq!(record.get("user").and_then(|v| v.as_str()), Some("from-call"));
    }

    #[test]
    fn test_build_does_not_touch_context() {
        let ctx = Context::from_pairs([("service", "x")]);
        let mut record = EventRecord::build(&ctx, Level::Info, "a".to_string(), &[]);
        record.insert("mutated", true);
        record.remove("service");

        assert!(ctx.contains_key("service"));
        assert!(!ctx.contains_key("mutated"));
    }

    #[test]
    fn test_serialize_is_flat() {
        let ctx = Context::from_pairs([("service", "x")]);
        let record = EventRecord::build(&ctx, Level::Info, "up".to_string(), &[]);
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"event\":\"up\""));
        assert!(json.contains("\"level\":\"info\""));
        assert!(json.contains("\"service\":\"x\""));
        assert!(!json.contains("fields"));
    }
}
