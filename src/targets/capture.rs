//! In-memory capture target for tests and demos

use crate::core::{BoxError, Rendered, Target};
use parking_lot::Mutex;

/// Collects every rendered value it receives
///
/// Keep an `Arc` handle on the target to inspect what reached the sink:
///
/// ```
/// use std::sync::Arc;
/// use boundlog::prelude::*;
///
/// let sink = Arc::new(CaptureTarget::new());
/// let logger = FilteringLogger::builder()
///     .processor(KeyValueRenderer::new())
///     .shared_target(Arc::clone(&sink) as Arc<dyn Target>)
///     .build();
///
/// logger.info("hello", &[], &[]).unwrap();
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Default)]
pub struct CaptureTarget {
    rendered: Mutex<Vec<Rendered>>,
}

impl CaptureTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rendered.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.lock().is_empty()
    }

    pub fn clear(&self) {
        self.rendered.lock().clear();
    }
}

impl Target for CaptureTarget {
    fn write(&self, rendered: &Rendered) -> std::result::Result<(), BoxError> {
        self.rendered.lock().push(rendered.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}
