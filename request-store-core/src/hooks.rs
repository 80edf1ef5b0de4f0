//! Customization points for request handling
//!
//! [`RequestHooks`] is injected into the gateway. Every method has a
//! default, so an implementation only overrides what it needs:
//!
//! ```
//! use request_store_core::error::GenericError;
//! use request_store_core::hooks::RequestHooks;
//!
//! struct FriendlyHooks;
//!
//! impl RequestHooks for FriendlyHooks {
//!     fn generic_message(&self, _error: &GenericError) -> String {
//!         "Something went wrong, please try again".into()
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;

use crate::error::{ErrorInfo, GenericError, ResponseInfo, ValidationError};

/// Success callback and per-shape error message derivation
pub trait RequestHooks {
    /// Called with the value of every successful request
    ///
    /// Implementations that care about a concrete type can downcast
    /// through [`Any`].
    fn on_success(&self, _value: &dyn Any) {}

    /// Message for a response-shaped error that carries a response
    ///
    /// Returns the `data` payload when present, else the status text.
    fn response_message(&self, response: &ResponseInfo) -> Option<String> {
        response.data_text().or_else(|| response.status_text.clone())
    }

    /// Message for any other error
    fn generic_message(&self, error: &GenericError) -> String {
        error.to_string()
    }

    /// Message for a model that failed validation
    fn validation_message(&self, error: &ValidationError) -> String {
        error.message.clone()
    }

    /// Message shown to the user for `error`
    ///
    /// Response-shaped errors without a response, or whose response yields
    /// no text, fall back to the error's display text so the message is
    /// never blank.
    fn error_message(&self, error: &ErrorInfo) -> String {
        let message = match error {
            ErrorInfo::Response(e) => e
                .response
                .as_ref()
                .and_then(|r| self.response_message(r))
                .unwrap_or_else(|| e.to_string()),
            ErrorInfo::Generic(e) => self.generic_message(e),
            ErrorInfo::Validation(e) => self.validation_message(e),
        };
        if message.trim().is_empty() {
            error.to_string()
        } else {
            message
        }
    }
}

/// Hooks with every default in place
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl RequestHooks for DefaultHooks {}

/// Hooks that forward successes to a closure
///
/// ```
/// use request_store_core::hooks::{FnHooks, RequestHooks};
/// use std::any::Any;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let count = AtomicUsize::new(0);
/// let hooks = FnHooks::new(|_value: &dyn Any| {
///     count.fetch_add(1, Ordering::SeqCst);
/// });
/// hooks.on_success(&42u32);
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
pub struct FnHooks<F> {
    on_success: F,
}

impl<F> FnHooks<F>
where
    F: Fn(&dyn Any),
{
    pub fn new(on_success: F) -> Self {
        Self { on_success }
    }
}

impl<F> fmt::Debug for FnHooks<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHooks").finish_non_exhaustive()
    }
}

impl<F> RequestHooks for FnHooks<F>
where
    F: Fn(&dyn Any),
{
    fn on_success(&self, value: &dyn Any) {
        (self.on_success)(value)
    }
}

impl<H: RequestHooks + ?Sized> RequestHooks for std::sync::Arc<H> {
    fn on_success(&self, value: &dyn Any) {
        (**self).on_success(value)
    }

    fn response_message(&self, response: &ResponseInfo) -> Option<String> {
        (**self).response_message(response)
    }

    fn generic_message(&self, error: &GenericError) -> String {
        (**self).generic_message(error)
    }

    fn validation_message(&self, error: &ValidationError) -> String {
        (**self).validation_message(error)
    }

    fn error_message(&self, error: &ErrorInfo) -> String {
        (**self).error_message(error)
    }
}
