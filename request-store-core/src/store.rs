//! Store base: domain state plus a request gateway

use std::any::Any;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ErrorInfo, StoreError};
use crate::gateway::{RequestGateway, Validate};
use crate::hooks::{DefaultHooks, RequestHooks};
use crate::outcome::RequestOutcome;
use crate::sink::{DiagnosticSink, TracingSink};
use crate::ui::UiState;

/// A client-side store that issues requests with UI feedback
///
/// The store holds its own domain state and a [`RequestGateway`] bound
/// to the shared UI state. Requests go through the gateway, so every
/// store gets the same loading and notification behaviour.
///
/// # Type Parameters
/// * `S` - The store's domain state
/// * `U` - The shared UI state
/// * `H` - Request hooks
/// * `D` - Diagnostic sink
///
/// # Example
/// ```ignore
/// #[derive(Default, Deserialize)]
/// struct ProfileState {
///     name: String,
/// }
///
/// let ui = UiStore::new();
/// let mut store = RequestStore::new(ProfileState::default(), ui.clone());
///
/// let outcome = store
///     .request_then(|| api::load_name(), |state, name| state.name = name.clone())
///     .await;
/// assert!(!ui.is_loading());
/// ```
pub struct RequestStore<S, U, H = DefaultHooks, D = TracingSink> {
    state: S,
    gateway: RequestGateway<U, H, D>,
}

impl<S, U: UiState> RequestStore<S, U> {
    /// Create a store with initial state and a default gateway over `ui`
    pub fn new(state: S, ui: U) -> Self {
        Self {
            state,
            gateway: RequestGateway::new(ui),
        }
    }
}

impl<S: DeserializeOwned, U: UiState> RequestStore<S, U> {
    /// Create a store whose initial state is read from a JSON model
    pub fn from_json(initial: Value, ui: U) -> Result<Self, StoreError> {
        let state = serde_json::from_value(initial)?;
        Ok(Self::new(state, ui))
    }
}

impl<S, U, H, D> RequestStore<S, U, H, D> {
    /// Create a store around an existing gateway
    pub fn with_gateway(state: S, gateway: RequestGateway<U, H, D>) -> Self {
        Self { state, gateway }
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Get a reference to the shared UI state
    pub fn ui(&self) -> &U {
        self.gateway.ui()
    }

    pub fn gateway(&self) -> &RequestGateway<U, H, D> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut RequestGateway<U, H, D> {
        &mut self.gateway
    }

    /// Split the store into its state and gateway
    pub fn into_parts(self) -> (S, RequestGateway<U, H, D>) {
        (self.state, self.gateway)
    }
}

impl<S, U, H, D> RequestStore<S, U, H, D>
where
    U: UiState,
    H: RequestHooks,
    D: DiagnosticSink,
{
    /// Run `action` through the gateway
    ///
    /// See [`RequestGateway::execute`].
    pub async fn request<R, E, F, Fut>(&self, action: F) -> RequestOutcome<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<ErrorInfo>,
        R: Any,
    {
        self.gateway.execute(action).await
    }

    /// Run `action` if `model` validates
    ///
    /// See [`RequestGateway::submit_if_valid`].
    pub async fn submit<M, R, E, F, Fut>(&self, model: &M, action: F) -> RequestOutcome<R>
    where
        M: Validate + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<ErrorInfo>,
        R: Any,
    {
        self.gateway.submit_if_valid(model, action).await
    }

    /// Run `action` and fold a successful value into the store's state
    ///
    /// `apply` runs after the loading flag has been lowered.
    pub async fn request_then<R, E, F, Fut, A>(&mut self, action: F, apply: A) -> RequestOutcome<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<ErrorInfo>,
        R: Any,
        A: FnOnce(&mut S, &R),
    {
        let outcome = self.gateway.execute(action).await;
        if let RequestOutcome::Success(value) = &outcome {
            apply(&mut self.state, value);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenericError;
    use crate::ui::{Notification, UiStore};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct CartState {
        items: Vec<String>,
        #[serde(default)]
        checked_out: bool,
    }

    #[test]
    fn test_from_json() {
        let store: RequestStore<CartState, UiStore> =
            RequestStore::from_json(json!({ "items": ["apple"] }), UiStore::new()).unwrap();
        assert_eq!(store.state().items, vec!["apple".to_string()]);
        assert!(!store.state().checked_out);
    }

    #[test]
    fn test_from_json_invalid() {
        let result: Result<RequestStore<CartState, UiStore>, _> =
            RequestStore::from_json(json!({ "items": 3 }), UiStore::new());
        assert!(matches!(result, Err(StoreError::InvalidJson(_))));
    }

    #[test]
    fn test_state_mut() {
        let mut store = RequestStore::new(CartState::default(), UiStore::new());
        store.state_mut().items.push("pear".into());
        assert_eq!(store.state().items.len(), 1);
    }

    #[tokio::test]
    async fn test_request_then_applies_on_success() {
        let ui = UiStore::new();
        let mut store = RequestStore::new(CartState::default(), ui.clone());

        let outcome = store
            .request_then(
                || async { Ok::<_, GenericError>(true) },
                |state, done| state.checked_out = *done,
            )
            .await;

        assert!(outcome.is_success());
        assert!(store.state().checked_out);
        assert!(!ui.is_loading());
    }

    #[tokio::test]
    async fn test_request_then_skips_apply_on_failure() {
        let ui = UiStore::new();
        let mut store = RequestStore::new(CartState::default(), ui.clone());

        let outcome = store
            .request_then(
                || async { Err::<bool, _>(GenericError::new("payment declined")) },
                |state, done| state.checked_out = *done,
            )
            .await;

        assert!(outcome.is_failure());
        assert!(!store.state().checked_out);
        assert_eq!(
            ui.notifications(),
            vec![Notification::error("Error: payment declined")]
        );
    }

    #[tokio::test]
    async fn test_submit_uses_gateway() {
        let store = RequestStore::new(CartState::default(), UiStore::new());
        let outcome = store
            .submit(&false, || async { Ok::<_, GenericError>(()) })
            .await;
        assert!(outcome.error().is_some_and(ErrorInfo::is_validation));
    }
}
