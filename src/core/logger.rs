//! The level-filtering bound logger

use super::bindable::BindableLogger;
use super::context::Context;
use super::error::{LogError, Result};
use super::event::{EventRecord, EXC_INFO_KEY};
use super::format::interpolate;
use super::level::Level;
use super::processor::{Processor, ProcessorChain, Rendered};
use super::target::{NullTarget, Target};
use super::value::{ExcInfoCapture, NoActiveExc, Value};
use std::fmt;
use std::sync::Arc;

/// The result of a single log call
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The call was below the configured threshold; no work was performed
    Suppressed,
    /// The chain rendered the record and the target consumed the result
    Delivered(Rendered),
}

impl Dispatch {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Dispatch::Suppressed)
    }

    pub fn rendered(&self) -> Option<&Rendered> {
        match self {
            Dispatch::Delivered(r) => Some(r),
            Dispatch::Suppressed => None,
        }
    }
}

/// A bound logger that filters by severity level
///
/// Carries an immutable context, a configured minimum level, a processor
/// chain, and a wrapped output target. Instances are immutable value-like
/// objects: every context operation derives a new logger, so instances can
/// be cloned and shared across threads freely.
///
/// Every severity has a blocking method and, behind the `async` feature, a
/// suspending `a`-prefixed counterpart with identical semantics.
///
/// # Example
///
/// ```
/// use boundlog::prelude::*;
///
/// let logger = FilteringLogger::builder()
///     .min_level(Level::Info)
///     .processor(KeyValueRenderer::new())
///     .target(ConsoleTarget::new())
///     .build()
///     .bind([("service", "api")]);
///
/// logger.info("server started", &[], &[("port", Value::from(8080))]).unwrap();
/// ```
#[derive(Clone)]
pub struct FilteringLogger {
    min_level: Level,
    context: Context,
    chain: ProcessorChain,
    target: Arc<dyn Target>,
    capture: Arc<dyn ExcInfoCapture>,
}

impl FilteringLogger {
    pub fn builder() -> FilteringLoggerBuilder {
        FilteringLoggerBuilder::new()
    }

    /// Check whether a call at `level` would be emitted
    ///
    /// Pure comparison against the configured threshold; callers can use it
    /// to skip expensive argument construction.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// The configured minimum level
    pub fn effective_level(&self) -> Level {
        self.min_level
    }

    /// The wrapped output target
    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    /// Log `event % args` with `kv` at an explicit level
    pub fn log(
        &self,
        level: Level,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.dispatch(level, event, args, kv)
    }

    /// Log `event % args` with `kv` at debug level
    pub fn debug(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Debug, event, args, kv)
    }

    /// Log `event % args` with `kv` at info level
    pub fn info(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Info, event, args, kv)
    }

    /// Log `event % args` with `kv` at info level
    pub fn msg(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Info, event, args, kv)
    }

    /// Log `event % args` with `kv` at warning level
    pub fn warning(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Warning, event, args, kv)
    }

    /// Log `event % args` with `kv` at warning level
    pub fn warn(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Warning, event, args, kv)
    }

    /// Log `event % args` with `kv` at error level
    pub fn error(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Error, event, args, kv)
    }

    /// Log `event % args` with `kv` at error level
    pub fn err(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Error, event, args, kv)
    }

    /// Log `event % args` with `kv` at critical level
    pub fn critical(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Critical, event, args, kv)
    }

    /// Log `event % args` with `kv` at critical level
    pub fn fatal(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        self.dispatch(Level::Critical, event, args, kv)
    }

    /// Log `event % args` with `kv` at error level and ensure exception
    /// info is attached to the record
    ///
    /// An explicit `exc_info` pair in `kv` wins; otherwise the configured
    /// capture hook supplies the currently active exception, and a null
    /// sentinel is attached when there is none.
    pub fn exception(&self, event: &str, args: &[Value], kv: &[(&str, Value)]) -> Result<Dispatch> {
        if !self.is_enabled_for(Level::Error) {
            return Ok(Dispatch::Suppressed);
        }
        let mut record = self.build_record(Level::Error, event, args, kv)?;
        self.ensure_exc_info(&mut record);
        self.deliver(Level::Error, record)
    }

    fn dispatch(
        &self,
        level: Level,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        if !self.is_enabled_for(level) {
            return Ok(Dispatch::Suppressed);
        }
        let record = self.build_record(level, event, args, kv)?;
        self.deliver(level, record)
    }

    /// Interpolate the message (only when positional arguments are present)
    /// and materialize the record from the current context
    fn build_record(
        &self,
        level: Level,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<EventRecord> {
        let message = if args.is_empty() {
            event.to_string()
        } else {
            interpolate(event, args)?
        };
        Ok(EventRecord::build(&self.context, level, message, kv))
    }

    fn ensure_exc_info(&self, record: &mut EventRecord) {
        if record.contains_key(EXC_INFO_KEY) {
            return;
        }
        match self.capture.capture() {
            Some(exc) => record.insert(EXC_INFO_KEY, exc),
            None => record.insert(EXC_INFO_KEY, Value::Null),
        };
    }

    fn deliver(&self, level: Level, record: EventRecord) -> Result<Dispatch> {
        let rendered = self
            .chain
            .run(self.target.as_ref(), level, record)
            .map_err(LogError::Downstream)?;
        self.target.write(&rendered).map_err(LogError::Downstream)?;
        Ok(Dispatch::Delivered(rendered))
    }

    fn derive(&self, context: Context) -> Self {
        Self {
            min_level: self.min_level,
            context,
            chain: self.chain.clone(),
            target: Arc::clone(&self.target),
            capture: Arc::clone(&self.capture),
        }
    }
}

#[cfg(feature = "async")]
impl FilteringLogger {
    /// Log `event % args` with `kv` at an explicit level, suspending while
    /// the chain and target run
    pub async fn alog(
        &self,
        level: Level,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(level, event, args, kv).await
    }

    /// Suspending counterpart of [`debug`](Self::debug)
    pub async fn adebug(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Debug, event, args, kv).await
    }

    /// Suspending counterpart of [`info`](Self::info)
    pub async fn ainfo(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Info, event, args, kv).await
    }

    /// Suspending counterpart of [`msg`](Self::msg)
    pub async fn amsg(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Info, event, args, kv).await
    }

    /// Suspending counterpart of [`warning`](Self::warning)
    pub async fn awarning(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Warning, event, args, kv).await
    }

    /// Suspending counterpart of [`warn`](Self::warn)
    pub async fn awarn(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Warning, event, args, kv).await
    }

    /// Suspending counterpart of [`error`](Self::error)
    pub async fn aerror(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Error, event, args, kv).await
    }

    /// Suspending counterpart of [`critical`](Self::critical)
    pub async fn acritical(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Critical, event, args, kv).await
    }

    /// Suspending counterpart of [`fatal`](Self::fatal)
    pub async fn afatal(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        self.adispatch(Level::Critical, event, args, kv).await
    }

    /// Suspending counterpart of [`exception`](Self::exception)
    pub async fn aexception(
        &self,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        if !self.is_enabled_for(Level::Error) {
            return Ok(Dispatch::Suppressed);
        }
        let mut record = self.build_record(Level::Error, event, args, kv)?;
        self.ensure_exc_info(&mut record);
        self.adeliver(Level::Error, record).await
    }

    async fn adispatch(
        &self,
        level: Level,
        event: &str,
        args: &[Value],
        kv: &[(&str, Value)],
    ) -> Result<Dispatch> {
        if !self.is_enabled_for(level) {
            return Ok(Dispatch::Suppressed);
        }
        let record = self.build_record(level, event, args, kv)?;
        self.adeliver(level, record).await
    }

    /// Run the chain and target on the blocking-task pool
    ///
    /// The gate check and record construction have already happened
    /// synchronously; only the I/O-bound part suspends.
    async fn adeliver(&self, level: Level, record: EventRecord) -> Result<Dispatch> {
        let chain = self.chain.clone();
        let target = Arc::clone(&self.target);
        let handle = tokio::task::spawn_blocking(move || {
            let rendered = chain.run(target.as_ref(), level, record)?;
            target.write(&rendered)?;
            Ok::<_, super::error::BoxError>(rendered)
        });
        match handle.await {
            Ok(Ok(rendered)) => Ok(Dispatch::Delivered(rendered)),
            Ok(Err(err)) => Err(LogError::Downstream(err)),
            Err(join) if join.is_panic() => std::panic::resume_unwind(join.into_panic()),
            Err(join) => Err(LogError::downstream(join)),
        }
    }
}

impl BindableLogger for FilteringLogger {
    fn context(&self) -> &Context {
        &self.context
    }

    fn bind<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.derive(self.context.bind(pairs))
    }

    fn unbind<'a, I>(&self, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(self.derive(self.context.unbind(keys)?))
    }

    fn try_unbind<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.derive(self.context.try_unbind(keys))
    }

    fn renew<K, V, I>(&self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.derive(self.context.renew(pairs))
    }
}

impl fmt::Debug for FilteringLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteringLogger")
            .field("min_level", &self.min_level)
            .field("context", &self.context)
            .field("chain", &self.chain)
            .field("target", &self.target.name())
            .finish()
    }
}

/// Builder for [`FilteringLogger`]
pub struct FilteringLoggerBuilder {
    min_level: Level,
    context: Context,
    steps: Vec<Arc<dyn Processor>>,
    target: Arc<dyn Target>,
    capture: Arc<dyn ExcInfoCapture>,
}

impl FilteringLoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            context: Context::new(),
            steps: Vec::new(),
            target: Arc::new(NullTarget),
            capture: Arc::new(NoActiveExc),
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Seed the logger's initial context
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Append one processor step to the chain
    #[must_use]
    pub fn processor(mut self, step: impl Processor + 'static) -> Self {
        self.steps.push(Arc::new(step));
        self
    }

    /// Append an already-shared processor step
    #[must_use]
    pub fn shared_processor(mut self, step: Arc<dyn Processor>) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Target + 'static) -> Self {
        self.target = Arc::new(target);
        self
    }

    /// Use an already-shared target, e.g. to keep a handle on a capture sink
    #[must_use]
    pub fn shared_target(mut self, target: Arc<dyn Target>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn exc_capture(mut self, capture: impl ExcInfoCapture + 'static) -> Self {
        self.capture = Arc::new(capture);
        self
    }

    pub fn build(self) -> FilteringLogger {
        FilteringLogger {
            min_level: self.min_level,
            context: self.context,
            chain: ProcessorChain::new(self.steps),
            target: self.target,
            capture: self.capture,
        }
    }
}

impl Default for FilteringLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BoxError;
    use crate::core::processor::ProcessorOutput;
    use crate::core::value::ExcInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations, then renders the record as its k=v text
    struct CountingRenderer {
        calls: Arc<AtomicUsize>,
    }

    impl Processor for CountingRenderer {
        fn process(
            &self,
            _target: &dyn Target,
            _level: Level,
            record: EventRecord,
        ) -> std::result::Result<ProcessorOutput, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProcessorOutput::Rendered(Rendered::Text(record.to_string())))
        }
    }

    fn counting_logger(min_level: Level) -> (FilteringLogger, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let logger = FilteringLogger::builder()
            .min_level(min_level)
            .processor(CountingRenderer {
                calls: Arc::clone(&calls),
            })
            .build();
        (logger, calls)
    }

    #[test]
    fn test_gate_short_circuit_runs_no_processor() {
        let (logger, calls) = counting_logger(Level::Info);

        let outcome = logger.debug("ignored", &[], &[]).unwrap();

        assert!(outcome.is_suppressed());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_enabled_call_reaches_processor() {
        let (logger, calls) = counting_logger(Level::Info);

        let outcome = logger.info("hello", &[], &[]).unwrap();

        assert!(!outcome.is_suppressed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_is_enabled_for_monotonic() {
        let (logger, _) = counting_logger(Level::Error);

        assert!(!logger.is_enabled_for(Level::Debug));
        assert!(!logger.is_enabled_for(Level::Warning));
        assert!(logger.is_enabled_for(Level::Error));
        assert!(logger.is_enabled_for(Level::Critical));
        assert_eq!(logger.effective_level(), Level::Error);
    }

    #[test]
    fn test_bind_derives_independent_logger() {
        let (logger, _) = counting_logger(Level::Info);
        let bound = logger.bind([("request_id", "r-1")]);

        assert!(logger.context().is_empty());
        assert_eq!(
            bound.context().get("request_id").and_then(|v| v.as_str()),
            Some("r-1")
        );
        assert_eq!(bound.effective_level(), logger.effective_level());
    }

    #[test]
    fn test_unbind_strictness() {
        let (logger, _) = counting_logger(Level::Info);
        let bound = logger.bind([("a", 1)]);

        assert!(bound.unbind(["a"]).is_ok());
        assert!(matches!(
            bound.unbind(["missing"]),
            Err(LogError::KeyNotFound { .. })
        ));
        // try_unbind never fails
        let _ = bound.try_unbind(["missing"]);
    }

    #[test]
    fn test_renew_clears_context() {
        let (logger, _) = counting_logger(Level::Info);
        let fresh = logger.bind([("a", 1), ("b", 2)]).renew([("c", 3)]);

        assert_eq!(fresh.context().len(), 1);
        assert!(fresh.context().contains_key("c"));
    }

    #[test]
    fn test_interpolation_failure_aborts_before_processors() {
        let (logger, calls) = counting_logger(Level::Info);

        let err = logger.info("%d items", &[Value::from("three")], &[]).unwrap_err();

        assert!(matches!(err, LogError::FormatMismatch { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_message_without_args_is_verbatim() {
        let (logger, _) = counting_logger(Level::Info);

        let outcome = logger.info("100% done", &[], &[]).unwrap();

        assert!(outcome
            .rendered()
            .and_then(|r| r.as_text())
            .unwrap()
            .contains("event=100% done"));
    }

    #[test]
    fn test_alias_records_are_identical() {
        let (logger, _) = counting_logger(Level::Debug);
        let logger = logger.bind([("service", "x")]);

        let canonical = logger.warning("w", &[], &[]).unwrap();
        let alias = logger.warn("w", &[], &[]).unwrap();
        assert_eq!(canonical, alias);

        let canonical = logger.critical("c", &[], &[]).unwrap();
        let alias = logger.fatal("c", &[], &[]).unwrap();
        assert_eq!(canonical, alias);

        let canonical = logger.error("e", &[], &[]).unwrap();
        let alias = logger.err("e", &[], &[]).unwrap();
        assert_eq!(canonical, alias);

        let canonical = logger.info("i", &[], &[]).unwrap();
        let alias = logger.msg("i", &[], &[]).unwrap();
        assert_eq!(canonical, alias);
    }

    #[test]
    fn test_exception_attaches_null_sentinel_without_capture() {
        let calls = Arc::new(AtomicUsize::new(0));
        struct Inspect {
            calls: Arc<AtomicUsize>,
        }
        impl Processor for Inspect {
            fn process(
                &self,
                _target: &dyn Target,
                _level: Level,
                record: EventRecord,
            ) -> std::result::Result<ProcessorOutput, BoxError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(record.get(EXC_INFO_KEY), Some(&Value::Null));
                assert_eq!(record.level_name(), Some("error"));
                Ok(ProcessorOutput::Rendered(Rendered::Text(record.to_string())))
            }
        }

        let logger = FilteringLogger::builder()
            .processor(Inspect {
                calls: Arc::clone(&calls),
            })
            .build();

        logger.exception("boom", &[], &[]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exception_uses_capture_hook() {
        struct AlwaysActive;
        impl ExcInfoCapture for AlwaysActive {
            fn capture(&self) -> Option<ExcInfo> {
                Some(ExcInfo::new("TestError", "active"))
            }
        }

        struct Inspect;
        impl Processor for Inspect {
            fn process(
                &self,
                _target: &dyn Target,
                _level: Level,
                record: EventRecord,
            ) -> std::result::Result<ProcessorOutput, BoxError> {
                match record.get(EXC_INFO_KEY) {
                    Some(Value::ExcInfo(e)) => assert_eq!(e.message, "active"),
                    other => panic!("expected captured exc_info, got {:?}", other),
                }
                Ok(ProcessorOutput::Rendered(Rendered::Text(record.to_string())))
            }
        }

        let logger = FilteringLogger::builder()
            .processor(Inspect)
            .exc_capture(AlwaysActive)
            .build();

        logger.exception("boom", &[], &[]).unwrap();
    }

    #[test]
    fn test_explicit_exc_info_wins_over_capture() {
        struct AlwaysActive;
        impl ExcInfoCapture for AlwaysActive {
            fn capture(&self) -> Option<ExcInfo> {
                Some(ExcInfo::new("TestError", "from-hook"))
            }
        }

        struct Inspect;
        impl Processor for Inspect {
            fn process(
                &self,
                _target: &dyn Target,
                _level: Level,
                record: EventRecord,
            ) -> std::result::Result<ProcessorOutput, BoxError> {
                match record.get(EXC_INFO_KEY) {
                    Some(Value::ExcInfo(e)) => assert_eq!(e.message, "explicit"),
                    other => panic!("expected explicit exc_info, got {:?}", other),
                }
                Ok(ProcessorOutput::Rendered(Rendered::Text(record.to_string())))
            }
        }

        let logger = FilteringLogger::builder()
            .processor(Inspect)
            .exc_capture(AlwaysActive)
            .build();

        logger
            .exception(
                "boom",
                &[],
                &[(EXC_INFO_KEY, Value::from(ExcInfo::new("TestError", "explicit")))],
            )
            .unwrap();
    }

    #[test]
    fn test_downstream_error_propagates_unwrapped() {
        let logger = FilteringLogger::builder()
            .processor(
                |_: &dyn Target, _: Level, _: EventRecord| -> std::result::Result<ProcessorOutput, BoxError> {
                    Err("renderer exploded".into())
                },
            )
            .build();

        let err = logger.info("x", &[], &[]).unwrap_err();
        assert_eq!(err.to_string(), "renderer exploded");
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_async_surface_matches_blocking() {
        let (logger, calls) = counting_logger(Level::Info);
        let logger = logger.bind([("service", "x")]);

        let suppressed = logger.adebug("nope", &[], &[]).await.unwrap();
        assert!(suppressed.is_suppressed());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let sync = logger.info("got %s items", &[Value::from(3)], &[]).unwrap();
        let async_ = logger.ainfo("got %s items", &[Value::from(3)], &[]).await.unwrap();
        assert_eq!(sync, async_);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
