//! request-store: loading and notification bookkeeping for client-side stores
//!
//! Wrap each async request in a [`RequestGateway`]: stale errors are cleared,
//! the loading flag is raised for the duration, and failures are logged and
//! surfaced as notifications. Callers get a [`RequestOutcome`] back and never
//! have to handle an error they forgot about.
//!
//! # Example
//! ```ignore
//! use request_store::prelude::*;
//!
//! let ui = UiStore::new();
//! let gateway = RequestGateway::new(ui.clone());
//!
//! if let RequestOutcome::Success(user) = gateway.execute(|| api::me()).await {
//!     println!("signed in as {}", user.name);
//! }
//! ```

// Re-export everything from core
pub use request_store_core::*;

// Recording assertions live at the core crate root
pub use request_store_core::{assert_not_recorded, assert_recorded, count_recorded, find_recorded};

/// Prelude for convenient imports
pub mod prelude {
    // Outcome and errors
    pub use request_store_core::{
        ErrorInfo, ErrorKind, GenericError, RequestOutcome, ResponseError, ResponseInfo,
        StoreError, ValidationError,
    };

    // UI state
    pub use request_store_core::{Notification, NotificationKind, UiSnapshot, UiState, UiStore};

    // Gateway and store
    pub use request_store_core::{
        GatewayConfig, RequestGateway, RequestStore, Validate,
    };

    // Customization
    pub use request_store_core::{
        ComposedSink, DefaultHooks, DiagnosticSink, FnHooks, NullSink, RequestHooks, TracingSink,
    };
}
