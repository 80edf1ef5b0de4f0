//! Gateway configuration

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, INVALID_MODEL_MESSAGE};
use crate::ui::NotificationKind;

/// Default store name used in diagnostics
pub const DEFAULT_STORE_NAME: &str = "store";

/// Configuration for a [`RequestGateway`](crate::RequestGateway)
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```
/// use request_store_core::config::GatewayConfig;
/// use request_store_core::ui::NotificationKind;
///
/// let config = GatewayConfig::from_json(r#"{ "name": "users", "clear_kind": "warning" }"#).unwrap();
/// assert_eq!(config.name, "users");
/// assert_eq!(config.clear_kind, NotificationKind::Warning);
/// assert_eq!(config.failure_kind, NotificationKind::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Store name attached to diagnostics
    pub name: String,
    /// Notifications of this kind are cleared before each request
    pub clear_kind: NotificationKind,
    /// Kind of the notification added when a request fails
    pub failure_kind: NotificationKind,
    /// Message carried by the error when a model fails validation
    pub validation_message: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            clear_kind: NotificationKind::Error,
            failure_kind: NotificationKind::Error,
            validation_message: INVALID_MODEL_MESSAGE.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a config from optional string settings
    ///
    /// # Arguments
    /// - `name`: store name (or None for the default)
    /// - `clear_kind`: kind name cleared before each request (or None for `error`)
    ///
    /// Unknown kind names fall back to the default.
    ///
    /// # Example
    /// ```
    /// use request_store_core::config::GatewayConfig;
    /// use request_store_core::ui::NotificationKind;
    ///
    /// let config = GatewayConfig::new(Some("profile"), Some("info"));
    /// assert_eq!(config.name, "profile");
    /// assert_eq!(config.clear_kind, NotificationKind::Info);
    /// ```
    pub fn new(name: Option<&str>, clear_kind: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from)
                .unwrap_or(defaults.name),
            clear_kind: clear_kind
                .and_then(NotificationKind::parse)
                .unwrap_or(defaults.clear_kind),
            ..defaults
        }
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the store name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the kind cleared before each request
    pub fn with_clear_kind(mut self, kind: NotificationKind) -> Self {
        self.clear_kind = kind;
        self
    }

    /// Set the kind of failure notifications
    pub fn with_failure_kind(mut self, kind: NotificationKind) -> Self {
        self.failure_kind = kind;
        self
    }

    /// Set the validation failure message
    pub fn with_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = message.into();
        self
    }
}
