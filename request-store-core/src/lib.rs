//! Core traits and types for request-store
//!
//! This crate provides the building blocks for client-side stores that run
//! async requests with UI feedback: a loading flag raised while a request is
//! in flight, stale error notifications cleared before it starts, and a
//! user-visible notification when it fails.
//!
//! # Core Concepts
//!
//! - **UiState**: Shared presentation state (loading flag + notifications)
//! - **RequestGateway**: Wraps one async action with UI bookkeeping
//! - **RequestOutcome**: Success/failure result that is never an unhandled error
//! - **ErrorInfo**: Validation, response-shaped or generic failure
//! - **RequestHooks**: Success callback and error message derivation
//! - **DiagnosticSink**: Where failures are logged
//!
//! # Basic Example
//!
//! ```ignore
//! use request_store_core::prelude::*;
//!
//! let ui = UiStore::new();
//! let gateway = RequestGateway::new(ui.clone());
//!
//! let outcome = gateway
//!     .execute(|| async {
//!         Err::<(), _>(
//!             ResponseError::new(json!({ "url": "/users/7" }))
//!                 .with_response(ResponseInfo::new().with_status(404).with_status_text("Not Found")),
//!         )
//!     })
//!     .await;
//!
//! assert!(outcome.is_failure());
//! assert!(!ui.is_loading());
//! assert_eq!(ui.notifications(), vec![Notification::error("Not Found")]);
//! ```
//!
//! # Store Pattern
//!
//! A store owns its domain state and a gateway bound to the UI state shared
//! across the application. Submissions are gated on a [`Validate`] model:
//!
//! ```ignore
//! struct SignupForm { email: String }
//!
//! impl Validate for SignupForm {
//!     fn validate(&self) -> bool { self.email.contains('@') }
//! }
//!
//! let store = RequestStore::new(AccountState::default(), ui.clone());
//! let outcome = store.submit(&form, || api::signup(form.email.clone())).await;
//! // An invalid form never reaches the API and leaves the UI untouched
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod hooks;
pub mod outcome;
pub mod sink;
pub mod store;
pub mod testing;
pub mod ui;

// Core type exports
pub use config::GatewayConfig;
pub use error::{
    ErrorInfo, ErrorKind, GenericError, ResponseError, ResponseInfo, StoreError, ValidationError,
};
pub use outcome::RequestOutcome;
pub use ui::{Notification, NotificationKind, UiSnapshot, UiState, UiStore};

// Gateway and store exports
pub use gateway::{RequestGateway, Validate};
pub use hooks::{DefaultHooks, FnHooks, RequestHooks};
pub use sink::{ComposedSink, DiagnosticSink, NullSink, TracingSink};
pub use store::RequestStore;

// Testing exports
pub use testing::{RecordingSink, RecordingUi, RequestHarness, SinkEvent, UiCall};

#[cfg(feature = "testing-time")]
pub use testing::{advance_time, pause_time, resume_time};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::GatewayConfig;
    pub use crate::error::{
        ErrorInfo, ErrorKind, GenericError, ResponseError, ResponseInfo, StoreError,
        ValidationError,
    };
    pub use crate::gateway::{RequestGateway, Validate};
    pub use crate::hooks::{DefaultHooks, FnHooks, RequestHooks};
    pub use crate::outcome::RequestOutcome;
    pub use crate::sink::{ComposedSink, DiagnosticSink, NullSink, TracingSink};
    pub use crate::store::RequestStore;
    pub use crate::ui::{Notification, NotificationKind, UiSnapshot, UiState, UiStore};
}
