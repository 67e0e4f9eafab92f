//! The bindable-logger capability
//!
//! The minimal contract shared by every bound-logger variant: read-only
//! access to the carried context plus the four derivation operations, each
//! returning a new logger instance of the same concrete type with all
//! other configuration carried over. Code that only needs to manipulate
//! context should depend on this trait, not on a concrete variant.

use super::context::Context;
use super::error::Result;
use super::value::Value;

pub trait BindableLogger: Sized {
    /// The context currently carried by this logger
    fn context(&self) -> &Context;

    /// Derive a logger with `pairs` merged into its context
    #[must_use]
    fn bind<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>;

    /// Derive a logger with each listed key removed from its context
    ///
    /// Strict variant: fails with `KeyNotFound` on any absent key.
    fn unbind<'a, I>(&self, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>;

    /// Like `unbind`, but best effort: absent keys are ignored
    #[must_use]
    fn try_unbind<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>;

    /// Derive a logger whose context holds only `pairs`
    #[must_use]
    fn renew<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>;
}
