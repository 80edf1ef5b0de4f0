//! Request gateway: loading flag and notification bookkeeping around async work
//!
//! # Example
//!
//! ```ignore
//! use request_store_core::prelude::*;
//!
//! let ui = UiStore::new();
//! let gateway = RequestGateway::new(ui.clone());
//!
//! let outcome = gateway
//!     .execute(|| async { api::load_profile(42).await })
//!     .await;
//!
//! match outcome {
//!     RequestOutcome::Success(profile) => println!("hello {}", profile.name),
//!     // Already logged and shown to the user
//!     RequestOutcome::Failure(_) => {}
//! }
//! assert!(!ui.is_loading());
//! ```
//!
//! # Lifecycle
//!
//! `execute` moves the UI through idle → loading → (success | error) → idle.
//! Overlapping calls on the same UI state are not serialized; the last
//! call to finish decides the loading flag.

use std::any::Any;
use std::future::Future;

use crate::config::GatewayConfig;
use crate::error::{ErrorInfo, ValidationError};
use crate::hooks::{DefaultHooks, RequestHooks};
use crate::outcome::RequestOutcome;
use crate::sink::{DiagnosticSink, TracingSink};
use crate::ui::{Notification, UiState};

/// A model that can check itself before being submitted
pub trait Validate {
    /// Returns `true` if the model may be submitted
    fn validate(&self) -> bool;
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> bool {
        (**self).validate()
    }
}

impl Validate for bool {
    fn validate(&self) -> bool {
        *self
    }
}

/// Resets the loading flag when dropped
///
/// Covers normal completion, early return, panics inside the action and
/// the request future being dropped mid-flight.
struct LoadingGuard<'a, U: UiState> {
    ui: &'a U,
}

impl<'a, U: UiState> LoadingGuard<'a, U> {
    fn engage(ui: &'a U) -> Self {
        ui.set_loading(true);
        Self { ui }
    }
}

impl<U: UiState> Drop for LoadingGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
    }
}

/// Runs async actions with loading and error feedback on a UI state
///
/// # Type Parameters
/// * `U` - The UI state receiving loading and notification updates
/// * `H` - Success and message hooks (see [`RequestHooks`])
/// * `D` - Where request diagnostics go (see [`DiagnosticSink`])
pub struct RequestGateway<U, H = DefaultHooks, D = TracingSink> {
    ui: U,
    hooks: H,
    sink: D,
    config: GatewayConfig,
}

impl<U, H, D> std::fmt::Debug for RequestGateway<U, H, D>
where
    U: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("ui", &self.ui)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<U: UiState> RequestGateway<U> {
    /// Create a gateway with default hooks, tracing diagnostics and default config
    pub fn new(ui: U) -> Self {
        Self {
            ui,
            hooks: DefaultHooks,
            sink: TracingSink::new(),
            config: GatewayConfig::default(),
        }
    }
}

impl<U, H, D> RequestGateway<U, H, D> {
    /// Create a gateway from all of its parts
    pub fn from_parts(ui: U, hooks: H, sink: D, config: GatewayConfig) -> Self {
        Self {
            ui,
            hooks,
            sink,
            config,
        }
    }

    /// Replace the hooks
    pub fn with_hooks<H2>(self, hooks: H2) -> RequestGateway<U, H2, D> {
        RequestGateway {
            ui: self.ui,
            hooks,
            sink: self.sink,
            config: self.config,
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink<D2>(self, sink: D2) -> RequestGateway<U, H, D2> {
        RequestGateway {
            ui: self.ui,
            hooks: self.hooks,
            sink,
            config: self.config,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the UI state
    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut GatewayConfig {
        &mut self.config
    }
}

impl<U, H, D> RequestGateway<U, H, D>
where
    U: UiState,
    H: RequestHooks,
    D: DiagnosticSink,
{
    /// Run `action` with loading and error feedback
    ///
    /// Clears notifications of the configured kind, raises the loading
    /// flag and awaits the action. On success the hooks see the value; on
    /// failure the error is logged and one notification is added. The
    /// loading flag is lowered on every exit path.
    ///
    /// The returned outcome is never an error the caller must handle:
    /// failures have already been reported.
    pub async fn execute<R, E, F, Fut>(&self, action: F) -> RequestOutcome<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<ErrorInfo>,
        R: Any,
    {
        self.ui.clear_notifications(self.config.clear_kind);
        let _loading = LoadingGuard::engage(&self.ui);
        self.sink.request_started(&self.config.name);

        match action().await {
            Ok(value) => {
                self.hooks.on_success(&value);
                self.sink.request_succeeded(&self.config.name);
                RequestOutcome::Success(value)
            }
            Err(error) => {
                let error = error.into();
                self.report_failure(&error);
                RequestOutcome::Failure(error)
            }
        }
    }

    /// Run `action` only if `model` validates
    ///
    /// An invalid model yields `Failure(ErrorInfo::Validation)` without
    /// invoking the action or touching the UI state.
    pub async fn submit_if_valid<M, R, E, F, Fut>(&self, model: &M, action: F) -> RequestOutcome<R>
    where
        M: Validate + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<ErrorInfo>,
        R: Any,
    {
        if !model.validate() {
            self.sink.validation_failed(&self.config.name);
            return RequestOutcome::Failure(
                ValidationError::new(self.config.validation_message.clone()).into(),
            );
        }
        self.execute(action).await
    }

    /// Message shown to the user for `error`
    pub fn error_message(&self, error: &ErrorInfo) -> String {
        self.hooks.error_message(error)
    }

    fn report_failure(&self, error: &ErrorInfo) {
        let message = self.hooks.error_message(error);
        self.sink.request_failed(&self.config.name, error, &message);
        self.ui
            .add_notification(Notification::new(self.config.failure_kind, message));
    }
}
