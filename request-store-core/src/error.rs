//! Error taxonomy for failed requests
//!
//! Every failure a request can produce ends up as an [`ErrorInfo`]:
//!
//! - [`ValidationError`]: the model was invalid, the action never ran
//! - [`ResponseError`]: a structured failure carrying request config and
//!   HTTP-like response metadata
//! - [`GenericError`]: anything else
//!
//! Errors that arrive as loose JSON (for example from a JS bridge or a
//! deserialized error payload) are sorted into these shapes by
//! [`ErrorInfo::classify`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default message for [`ValidationError`]
pub const INVALID_MODEL_MESSAGE: &str = "`model` is in invalid state.";

/// The pre-flight check on a model failed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for ValidationError {
    fn default() -> Self {
        Self::new(INVALID_MODEL_MESSAGE)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidationError: {}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Response metadata attached to a [`ResponseError`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "status_text")]
    pub status_text: Option<String>,
}

impl ResponseInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    /// Read a response from loosely typed JSON, field by field
    ///
    /// A field of the wrong type is dropped on its own: a `status` sent as
    /// `"404"` still leaves `data` and `statusText` intact.
    pub fn from_loose(value: &Value) -> Self {
        Self {
            data: value.get("data").filter(|d| !d.is_null()).cloned(),
            status: value
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok()),
            status_text: value
                .get("statusText")
                .or_else(|| value.get("status_text"))
                .and_then(Value::as_str)
                .map(String::from),
        }
    }

    /// The `data` payload as display text, if it carries anything
    ///
    /// `null`, `false`, `0` and empty strings count as absent. Strings are
    /// returned verbatim, other values as compact JSON.
    pub fn data_text(&self) -> Option<String> {
        match self.data.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// A structured request failure
///
/// `config` is the request configuration that produced the failure. A
/// response-shaped error may still lack a `response`, e.g. when the
/// request never reached the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseInfo>,
}

impl ResponseError {
    pub fn new(config: impl Into<Value>) -> Self {
        Self {
            config: config.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: ResponseInfo) -> Self {
        self.response = Some(response);
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().and_then(|r| r.status)
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            Some(status) => write!(f, "Request failed with status code {}", status),
            None => f.write_str("Request failed"),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Any other failure, rendered as `"{name}: {message}"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericError {
    pub name: String,
    pub message: String,
}

impl GenericError {
    /// Create an error named `Error`
    pub fn new(message: impl Into<String>) -> Self {
        Self::named("Error", message)
    }

    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Capture an arbitrary error by its display text
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::new(error.to_string())
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for GenericError {}

/// Shape of an [`ErrorInfo`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Response,
    Generic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Response => "response",
            ErrorKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed request, sorted by shape
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorInfo {
    Validation(ValidationError),
    Response(ResponseError),
    Generic(GenericError),
}

impl ErrorInfo {
    /// Sort a loosely typed error value into its shape
    ///
    /// A JSON object carrying a `config` key is response-shaped. Everything
    /// else is generic: strings become the message, objects contribute
    /// their `name`/`message` fields, other values their JSON text.
    pub fn classify(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.contains_key("config") {
                let config = map.get("config").cloned().unwrap_or(Value::Null);
                let response = map
                    .get("response")
                    .filter(|r| !r.is_null())
                    .map(ResponseInfo::from_loose);
                return ErrorInfo::Response(ResponseError { config, response });
            }

            let message = map.get("message").and_then(Value::as_str);
            let name = map.get("name").and_then(Value::as_str);
            return match (name, message) {
                (Some(name), Some(message)) => ErrorInfo::Generic(GenericError::named(name, message)),
                (None, Some(message)) => ErrorInfo::Generic(GenericError::new(message)),
                (Some(name), None) => ErrorInfo::Generic(GenericError::named(name, "")),
                (None, None) => ErrorInfo::Generic(GenericError::new(value.to_string())),
            };
        }

        match value {
            Value::String(s) => ErrorInfo::Generic(GenericError::new(s)),
            other => ErrorInfo::Generic(GenericError::new(other.to_string())),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorInfo::Validation(_) => ErrorKind::Validation,
            ErrorInfo::Response(_) => ErrorKind::Response,
            ErrorInfo::Generic(_) => ErrorKind::Generic,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ErrorInfo::Validation(_))
    }

    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            ErrorInfo::Response(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP-like status, for response-shaped errors that carry one
    pub fn status(&self) -> Option<u16> {
        self.as_response().and_then(ResponseError::status)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorInfo::Validation(e) => e.fmt(f),
            ErrorInfo::Response(e) => e.fmt(f),
            ErrorInfo::Generic(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ErrorInfo {}

impl From<ValidationError> for ErrorInfo {
    fn from(e: ValidationError) -> Self {
        ErrorInfo::Validation(e)
    }
}

impl From<ResponseError> for ErrorInfo {
    fn from(e: ResponseError) -> Self {
        ErrorInfo::Response(e)
    }
}

impl From<GenericError> for ErrorInfo {
    fn from(e: GenericError) -> Self {
        ErrorInfo::Generic(e)
    }
}

impl From<Value> for ErrorInfo {
    fn from(value: Value) -> Self {
        ErrorInfo::classify(value)
    }
}

impl From<serde_json::Error> for ErrorInfo {
    fn from(e: serde_json::Error) -> Self {
        ErrorInfo::Generic(GenericError::named("SyntaxError", e.to_string()))
    }
}

impl From<std::io::Error> for ErrorInfo {
    fn from(e: std::io::Error) -> Self {
        ErrorInfo::Generic(GenericError::from_error(&e))
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        ErrorInfo::Generic(GenericError::new(message))
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        ErrorInfo::Generic(GenericError::new(message))
    }
}

/// Failure while building a store or its configuration
#[derive(Debug)]
pub enum StoreError {
    /// The initial state or config JSON did not match the expected shape
    InvalidJson(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidJson(e) => write!(f, "Invalid JSON model: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::InvalidJson(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidJson(e)
    }
}
