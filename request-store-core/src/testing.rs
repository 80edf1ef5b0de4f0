//! Test utilities for request-store applications
//!
//! This module provides helpers for testing stores built on the gateway:
//!
//! - [`RecordingUi`]: a [`UiState`] that records every call in order
//! - [`RecordingSink`]: a [`DiagnosticSink`] that records every event
//! - [`RequestHarness`]: a gateway wired to both
//! - Assertion macros for verifying recorded calls
//!
//! # Example
//!
//! ```
//! use request_store_core::testing::{RequestHarness, UiCall};
//! use request_store_core::error::GenericError;
//! use request_store_core::{assert_recorded, count_recorded};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut harness = RequestHarness::new();
//!
//! let outcome = harness
//!     .gateway
//!     .execute(|| async { Err::<(), _>(GenericError::new("boom")) })
//!     .await;
//! assert!(outcome.is_failure());
//!
//! let calls = harness.drain_calls();
//! assert_recorded!(calls, UiCall::AddNotification(n) if n.text == "Error: boom");
//! assert_eq!(count_recorded!(calls, UiCall::SetLoading(_)), 2);
//! # });
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::GatewayConfig;
use crate::error::{ErrorInfo, ErrorKind};
use crate::gateway::RequestGateway;
use crate::hooks::DefaultHooks;
use crate::sink::DiagnosticSink;
use crate::ui::{Notification, NotificationKind, UiSnapshot, UiState};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call made on a [`RecordingUi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCall {
    SetLoading(bool),
    ClearNotifications(NotificationKind),
    AddNotification(Notification),
}

/// UI state that records every call and keeps a live snapshot
///
/// The snapshot reflects the calls so far, so an action under test can
/// observe the loading flag while it runs.
#[derive(Debug, Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
    state: Mutex<UiSnapshot>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone all calls recorded so far
    pub fn calls(&self) -> Vec<UiCall> {
        lock(&self.calls).clone()
    }

    /// Take all calls recorded so far
    pub fn drain_calls(&self) -> Vec<UiCall> {
        std::mem::take(&mut *lock(&self.calls))
    }

    pub fn snapshot(&self) -> UiSnapshot {
        lock(&self.state).clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.clone()
    }
}

impl UiState for RecordingUi {
    fn set_loading(&self, loading: bool) {
        lock(&self.calls).push(UiCall::SetLoading(loading));
        lock(&self.state).loading = loading;
    }

    fn clear_notifications(&self, kind: NotificationKind) {
        lock(&self.calls).push(UiCall::ClearNotifications(kind));
        lock(&self.state).notifications.retain(|n| n.kind != kind);
    }

    fn add_notification(&self, notification: Notification) {
        lock(&self.calls).push(UiCall::AddNotification(notification.clone()));
        lock(&self.state).notifications.push(notification);
    }
}

/// An event received by a [`RecordingSink`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Started {
        store: String,
    },
    Succeeded {
        store: String,
    },
    Failed {
        store: String,
        kind: ErrorKind,
        message: String,
    },
    ValidationFailed {
        store: String,
    },
}

/// Diagnostic sink that records every event
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone all events recorded so far
    pub fn events(&self) -> Vec<SinkEvent> {
        lock(&self.events).clone()
    }

    /// Take all events recorded so far
    pub fn drain_events(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *lock(&self.events))
    }
}

impl DiagnosticSink for RecordingSink {
    fn request_started(&self, store: &str) {
        lock(&self.events).push(SinkEvent::Started {
            store: store.to_string(),
        });
    }

    fn request_succeeded(&self, store: &str) {
        lock(&self.events).push(SinkEvent::Succeeded {
            store: store.to_string(),
        });
    }

    fn request_failed(&self, store: &str, error: &ErrorInfo, message: &str) {
        lock(&self.events).push(SinkEvent::Failed {
            store: store.to_string(),
            kind: error.kind(),
            message: message.to_string(),
        });
    }

    fn validation_failed(&self, store: &str) {
        lock(&self.events).push(SinkEvent::ValidationFailed {
            store: store.to_string(),
        });
    }
}

/// Gateway wired to a [`RecordingUi`] and a [`RecordingSink`]
///
/// # Example
///
/// ```ignore
/// let mut harness = RequestHarness::new();
/// let outcome = harness.gateway.execute(|| api::save(&form)).await;
///
/// let calls = harness.drain_calls();
/// assert_eq!(calls.first(), Some(&UiCall::ClearNotifications(NotificationKind::Error)));
/// ```
pub struct RequestHarness<H = DefaultHooks> {
    /// The UI state under test
    pub ui: Arc<RecordingUi>,
    /// The diagnostic sink under test
    pub sink: Arc<RecordingSink>,
    /// Gateway reporting to `ui` and `sink`
    pub gateway: RequestGateway<Arc<RecordingUi>, H, Arc<RecordingSink>>,
}

impl RequestHarness {
    /// Create a harness with default hooks and config
    pub fn new() -> Self {
        Self::with_hooks(DefaultHooks)
    }
}

impl Default for RequestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RequestHarness<H> {
    /// Create a harness with custom hooks
    pub fn with_hooks(hooks: H) -> Self {
        let ui = Arc::new(RecordingUi::new());
        let sink = Arc::new(RecordingSink::new());
        let gateway =
            RequestGateway::from_parts(ui.clone(), hooks, sink.clone(), GatewayConfig::default());
        Self { ui, sink, gateway }
    }

    /// Replace the gateway configuration
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.gateway = self.gateway.with_config(config);
        self
    }

    /// Take all UI calls recorded so far
    pub fn drain_calls(&mut self) -> Vec<UiCall> {
        self.ui.drain_calls()
    }

    /// Take all sink events recorded so far
    pub fn drain_events(&mut self) -> Vec<SinkEvent> {
        self.sink.drain_events()
    }
}

/// Short type name of the records in a slice, e.g. `UiCall`
///
/// Used by the recording macros to name what they were searching.
#[doc(hidden)]
pub fn record_type_name<T>(_records: &[T]) -> &'static str {
    let name = std::any::type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Assert that a matching call or event was recorded.
///
/// # Example
///
/// ```ignore
/// use request_store::testing::assert_recorded;
///
/// let calls = harness.drain_calls();
/// assert_recorded!(calls, UiCall::SetLoading(true));
/// assert_recorded!(calls, UiCall::AddNotification(n) if n.text == "Not Found");
/// ```
#[macro_export]
macro_rules! assert_recorded {
    ($records:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $records.iter().any(|r| matches!(r, $pattern $(if $guard)?)),
            "Expected a {} matching `{}`, but got: {:?}",
            $crate::testing::record_type_name(&$records[..]),
            stringify!($pattern),
            $records
        );
    };
}

/// Assert that NO matching call or event was recorded.
///
/// # Example
///
/// ```ignore
/// use request_store::testing::assert_not_recorded;
///
/// let calls = harness.drain_calls();
/// assert_not_recorded!(calls, UiCall::AddNotification(_));
/// ```
#[macro_export]
macro_rules! assert_not_recorded {
    ($records:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$records.iter().any(|r| matches!(r, $pattern $(if $guard)?)),
            "Expected NO {} matching `{}`, but it was: {:?}",
            $crate::testing::record_type_name(&$records[..]),
            stringify!($pattern),
            $records
        );
    };
}

/// Find and return the first record matching a pattern.
#[macro_export]
macro_rules! find_recorded {
    ($records:expr, $pattern:pat $(if $guard:expr)?) => {
        $records.iter().find(|r| matches!(r, $pattern $(if $guard)?))
    };
}

/// Count how many records match a pattern.
///
/// # Example
///
/// ```ignore
/// use request_store::testing::count_recorded;
///
/// let calls = harness.drain_calls();
/// assert_eq!(count_recorded!(calls, UiCall::ClearNotifications(_)), 1);
/// ```
#[macro_export]
macro_rules! count_recorded {
    ($records:expr, $pattern:pat $(if $guard:expr)?) => {
        $records.iter().filter(|r| matches!(r, $pattern $(if $guard)?)).count()
    };
}

/// Pause the tokio clock so slow requests can be stepped through.
#[cfg(feature = "testing-time")]
pub fn pause_time() {
    tokio::time::pause();
}

/// Resume the tokio clock after [`pause_time`].
#[cfg(feature = "testing-time")]
pub fn resume_time() {
    tokio::time::resume();
}

/// Advance the paused tokio clock.
#[cfg(feature = "testing-time")]
pub async fn advance_time(duration: std::time::Duration) {
    tokio::time::advance(duration).await;
}
