//! UI state shared between request handling and the presentation layer
//!
//! The gateway only ever talks to the [`UiState`] trait. [`UiStore`] is the
//! stock implementation: a cheap-to-clone handle over a `watch` channel so
//! views can subscribe to loading and notification changes.
//!
//! # Example
//!
//! ```
//! use request_store_core::ui::{Notification, NotificationKind, UiState, UiStore};
//!
//! let ui = UiStore::new();
//! let mut rx = ui.subscribe();
//!
//! ui.set_loading(true);
//! ui.add_notification(Notification::error("Not Found"));
//!
//! assert!(rx.has_changed().unwrap());
//! let snapshot = rx.borrow_and_update().clone();
//! assert!(snapshot.loading);
//! assert_eq!(snapshot.notifications_of(NotificationKind::Error).count(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Severity tag of a user-facing notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }

    /// Parse a kind from its lowercase name
    ///
    /// Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Some(NotificationKind::Info),
            "success" => Some(NotificationKind::Success),
            "warning" | "warn" => Some(NotificationKind::Warning),
            "error" => Some(NotificationKind::Error),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing message with a kind tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, text)
    }
}

/// Side-effect interface the gateway uses to report request progress
///
/// Methods take `&self` so the running action may read the same state
/// while the gateway holds it. Implementations are expected to use
/// interior mutability.
pub trait UiState {
    /// Set or reset the loading flag
    fn set_loading(&self, loading: bool);

    /// Remove every notification of the given kind
    fn clear_notifications(&self, kind: NotificationKind);

    /// Append a notification
    fn add_notification(&self, notification: Notification);
}

impl<T: UiState + ?Sized> UiState for &T {
    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading)
    }

    fn clear_notifications(&self, kind: NotificationKind) {
        (**self).clear_notifications(kind)
    }

    fn add_notification(&self, notification: Notification) {
        (**self).add_notification(notification)
    }
}

impl<T: UiState + ?Sized> UiState for Arc<T> {
    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading)
    }

    fn clear_notifications(&self, kind: NotificationKind) {
        (**self).clear_notifications(kind)
    }

    fn add_notification(&self, notification: Notification) {
        (**self).add_notification(notification)
    }
}

/// Point-in-time copy of the UI state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub loading: bool,
    pub notifications: Vec<Notification>,
}

impl UiSnapshot {
    /// Iterate notifications of a single kind, oldest first
    pub fn notifications_of(&self, kind: NotificationKind) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(move |n| n.kind == kind)
    }
}

/// Observable UI state backed by a `watch` channel
///
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct UiStore {
    tx: Arc<watch::Sender<UiSnapshot>>,
}

impl fmt::Debug for UiStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiStore")
            .field("state", &*self.tx.borrow())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UiStore {
    /// Create an idle store with no notifications
    pub fn new() -> Self {
        Self::with_snapshot(UiSnapshot::default())
    }

    /// Create a store seeded with the given state
    pub fn with_snapshot(snapshot: UiSnapshot) -> Self {
        let (tx, _rx) = watch::channel(snapshot);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.tx.subscribe()
    }

    /// Clone the current state
    pub fn snapshot(&self) -> UiSnapshot {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    /// Clone the current notifications, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.tx.borrow().notifications.clone()
    }

    /// Clone the current notifications of one kind, oldest first
    pub fn notifications_of(&self, kind: NotificationKind) -> Vec<Notification> {
        self.tx.borrow().notifications_of(kind).cloned().collect()
    }

    /// Remove every notification regardless of kind
    pub fn clear_all(&self) {
        self.tx.send_if_modified(|state| {
            let had_any = !state.notifications.is_empty();
            state.notifications.clear();
            had_any
        });
    }

    /// Remove the notification at `index`, returning it
    ///
    /// Returns `None` if the index is out of range.
    pub fn dismiss(&self, index: usize) -> Option<Notification> {
        let mut removed = None;
        self.tx.send_if_modified(|state| {
            if index < state.notifications.len() {
                removed = Some(state.notifications.remove(index));
                true
            } else {
                false
            }
        });
        removed
    }
}

impl UiState for UiStore {
    fn set_loading(&self, loading: bool) {
        self.tx.send_if_modified(|state| {
            if state.loading == loading {
                return false;
            }
            state.loading = loading;
            true
        });
    }

    fn clear_notifications(&self, kind: NotificationKind) {
        self.tx.send_if_modified(|state| {
            let before = state.notifications.len();
            state.notifications.retain(|n| n.kind != kind);
            state.notifications.len() != before
        });
    }

    fn add_notification(&self, notification: Notification) {
        self.tx.send_modify(|state| state.notifications.push(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(NotificationKind::parse("error"), Some(NotificationKind::Error));
        assert_eq!(NotificationKind::parse(" Warn "), Some(NotificationKind::Warning));
        assert_eq!(NotificationKind::parse("fatal"), None);
        assert_eq!(NotificationKind::Success.to_string(), "success");
    }

    #[test]
    fn test_notification_serde_shape() {
        let json = serde_json::to_value(Notification::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "error", "text": "boom" }));
    }

    #[test]
    fn test_clear_only_matching_kind() {
        let ui = UiStore::new();
        ui.add_notification(Notification::error("a"));
        ui.add_notification(Notification::info("b"));
        ui.add_notification(Notification::error("c"));

        ui.clear_notifications(NotificationKind::Error);

        assert_eq!(ui.notifications(), vec![Notification::info("b")]);
    }

    #[test]
    fn test_clones_share_state() {
        let ui = UiStore::new();
        let view = ui.clone();

        ui.set_loading(true);
        assert!(view.is_loading());
    }

    #[test]
    fn test_set_loading_same_value_does_not_notify() {
        let ui = UiStore::new();
        let mut rx = ui.subscribe();

        ui.set_loading(false);
        assert!(!rx.has_changed().unwrap());

        ui.set_loading(true);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
    }

    #[test]
    fn test_dismiss() {
        let ui = UiStore::new();
        ui.add_notification(Notification::warning("w"));

        assert_eq!(ui.dismiss(3), None);
        assert_eq!(ui.dismiss(0), Some(Notification::warning("w")));
        assert!(ui.notifications().is_empty());
    }

    #[test]
    fn test_clear_all() {
        let ui = UiStore::with_snapshot(UiSnapshot {
            loading: false,
            notifications: vec![Notification::success("ok"), Notification::error("no")],
        });
        ui.clear_all();
        assert!(ui.snapshot().notifications.is_empty());
    }
}
