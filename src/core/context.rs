//! Immutable key/value context carried by bound loggers
//!
//! A `Context` is never mutated in place: every derivation (`bind`,
//! `unbind`, `try_unbind`, `renew`) allocates a fresh snapshot and leaves
//! the receiver untouched. Cloning a `Context` (or a logger holding one)
//! shares the snapshot behind an `Arc`, so handing loggers across threads
//! is free and requires no synchronization.

use super::error::{LogError, Result};
use super::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Context {
    fields: Arc<HashMap<String, Value>>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from key/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: Arc::new(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Derive a context with `pairs` merged in, last-write-wins on collision
    #[must_use]
    pub fn bind<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut fields = (*self.fields).clone();
        for (k, v) in pairs {
            fields.insert(k.into(), v.into());
        }
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Derive a context with each listed key removed
    ///
    /// Strict variant: fails with `KeyNotFound` if any key is absent, and
    /// the receiver is left untouched.
    pub fn unbind<'a, I>(&self, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = (*self.fields).clone();
        for key in keys {
            if fields.remove(key).is_none() {
                return Err(LogError::key_not_found(key));
            }
        }
        Ok(Self {
            fields: Arc::new(fields),
        })
    }

    /// Like `unbind`, but best effort: absent keys are ignored
    #[must_use]
    pub fn try_unbind<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = (*self.fields).clone();
        for key in keys {
            fields.remove(key);
        }
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Derive a context containing only `pairs`, discarding everything else
    #[must_use]
    pub fn renew<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
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

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        let mut pairs: Vec<_> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();
        pairs.join(" ")
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}
