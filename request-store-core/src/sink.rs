//! Diagnostic sinks for request lifecycle events
//!
//! The gateway reports every request to a [`DiagnosticSink`]. The default
//! [`TracingSink`] forwards to `tracing`; [`NullSink`] discards everything.

use std::fmt;

use crate::error::ErrorInfo;

/// Receives request lifecycle events
///
/// `store` is the configured name of the store issuing the request.
pub trait DiagnosticSink {
    /// Called right before the action is invoked
    fn request_started(&self, _store: &str) {}

    /// Called after the action resolved successfully
    fn request_succeeded(&self, _store: &str) {}

    /// Called after the action failed, with the message shown to the user
    fn request_failed(&self, store: &str, error: &ErrorInfo, message: &str);

    /// Called when a submit was rejected before running the action
    fn validation_failed(&self, _store: &str) {}
}

/// A sink that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn request_failed(&self, _store: &str, _error: &ErrorInfo, _message: &str) {}
}

/// Sink that emits `tracing` events under the `request_store` target
#[derive(Debug, Clone)]
pub struct TracingSink {
    /// Whether to log request start and success at debug level
    pub log_progress: bool,
    /// Whether to log failures at error level
    pub log_failures: bool,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingSink {
    /// Create a sink that logs failures only
    pub fn new() -> Self {
        Self {
            log_progress: false,
            log_failures: true,
        }
    }

    /// Create a sink that also logs request start and success
    pub fn verbose() -> Self {
        Self {
            log_progress: true,
            log_failures: true,
        }
    }
}

impl DiagnosticSink for TracingSink {
    fn request_started(&self, store: &str) {
        if self.log_progress {
            tracing::debug!(target: "request_store", store = %store, "Request started");
        }
    }

    fn request_succeeded(&self, store: &str) {
        if self.log_progress {
            tracing::debug!(target: "request_store", store = %store, "Request succeeded");
        }
    }

    fn validation_failed(&self, store: &str) {
        if self.log_progress {
            tracing::debug!(target: "request_store", store = %store, "Submit rejected by validation");
        }
    }

    fn request_failed(&self, store: &str, error: &ErrorInfo, message: &str) {
        if self.log_failures {
            tracing::error!(
                target: "request_store",
                store = %store,
                kind = %error.kind(),
                status = ?error.status(),
                text = %message,
                error = ?error,
                "Request failed"
            );
        }
    }
}

/// Fan events out to several sinks
pub struct ComposedSink {
    sinks: Vec<Box<dyn DiagnosticSink + Send + Sync>>,
}

impl fmt::Debug for ComposedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedSink")
            .field("sinks_count", &self.sinks.len())
            .finish()
    }
}

impl Default for ComposedSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposedSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink to the composition
    pub fn add<D: DiagnosticSink + Send + Sync + 'static>(&mut self, sink: D) {
        self.sinks.push(Box::new(sink));
    }

    /// Builder form of [`add`](Self::add)
    pub fn with<D: DiagnosticSink + Send + Sync + 'static>(mut self, sink: D) -> Self {
        self.add(sink);
        self
    }
}

impl DiagnosticSink for ComposedSink {
    fn request_started(&self, store: &str) {
        for sink in &self.sinks {
            sink.request_started(store);
        }
    }

    fn request_succeeded(&self, store: &str) {
        for sink in &self.sinks {
            sink.request_succeeded(store);
        }
    }

    fn request_failed(&self, store: &str, error: &ErrorInfo, message: &str) {
        for sink in &self.sinks {
            sink.request_failed(store, error, message);
        }
    }

    fn validation_failed(&self, store: &str) {
        for sink in &self.sinks {
            sink.validation_failed(store);
        }
    }
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<D> {
    fn request_started(&self, store: &str) {
        (**self).request_started(store)
    }

    fn request_succeeded(&self, store: &str) {
        (**self).request_succeeded(store)
    }

    fn request_failed(&self, store: &str, error: &ErrorInfo, message: &str) {
        (**self).request_failed(store, error, message)
    }

    fn validation_failed(&self, store: &str) {
        (**self).validation_failed(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenericError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingSink {
        started: AtomicUsize,
        failed: AtomicUsize,
    }

    impl DiagnosticSink for CountingSink {
        fn request_started(&self, _store: &str) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn request_failed(&self, _store: &str, _error: &ErrorInfo, _message: &str) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_composed_sink_fans_out() {
        let a = Arc::new(CountingSink::default());
        let b = Arc::new(CountingSink::default());
        let sink = ComposedSink::new().with(a.clone()).with(b.clone());

        let error: ErrorInfo = GenericError::new("boom").into();
        sink.request_started("users");
        sink.request_failed("users", &error, "Error: boom");

        for counter in [&a, &b] {
            assert_eq!(counter.started.load(Ordering::SeqCst), 1);
            assert_eq!(counter.failed.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_tracing_sink_modes() {
        let quiet = TracingSink::new();
        assert!(!quiet.log_progress);
        assert!(quiet.log_failures);

        let verbose = TracingSink::verbose();
        assert!(verbose.log_progress);

        // No subscriber installed; must not panic
        let error: ErrorInfo = GenericError::new("boom").into();
        verbose.request_started("users");
        verbose.request_failed("users", &error, "Error: boom");
    }
}
