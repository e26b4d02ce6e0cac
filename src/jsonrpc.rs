//! Request and response structures exchanged through the request/response files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Code for both "Service not found" and "Method not found"
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Code for any failure caught by the failure boundary
pub const SERVER_ERROR: i32 = -32000;

/// Request read from the request file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// Method name in `Service.function` form
    pub method: String,
    /// Positional arguments
    #[serde(default)]
    pub params: Vec<Value>,
}

/// Response written to the response file (either success or error)
///
/// The error variant is listed first so that deserializing an error object
/// never matches the success shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Error response
    Error {
        /// Error code
        error: i32,
        /// Error message
        msg: String,
    },
    /// Success response
    Success {
        /// Value returned by the invoked method
        result: Value,
    },
}

impl Response {
    /// Whether this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

/// Create a success response
pub fn success(result: Value) -> Response {
    Response::Success { result }
}

/// Create an error response
pub fn error(code: i32, msg: impl Into<String>) -> Response {
    Response::Error {
        error: code,
        msg: msg.into(),
    }
}

/// Create a service not found error response
pub fn service_not_found() -> Response {
    error(METHOD_NOT_FOUND, "Service not found")
}

/// Create a method not found error response
pub fn method_not_found() -> Response {
    error(METHOD_NOT_FOUND, "Method not found")
}

/// Create the response reported for an uncaught failure
pub fn server_error(msg: impl Into<String>) -> Response {
    error(SERVER_ERROR, msg)
}

/// Split a `Service.function` method name into its two parts.
///
/// Returns `None` unless the name contains exactly one `.`.
pub fn split_method(method: &str) -> Option<(&str, &str)> {
    match method.split_once('.') {
        Some((service, function)) if !function.contains('.') => Some((service, function)),
        _ => None,
    }
}
