//! File-based JSONRPC-style dispatcher for in-process services.
//!
//! A run reads one request (`service_req.json`) naming a `Service.method`
//! call, invokes the matching handler from a [`Registry`], and writes exactly
//! one response (`service_resp.json`). Any failure along the way, panics
//! included, still produces an error response.

use std::error::Error as StdError;
use std::fmt;

pub mod config;
pub mod dispatcher;
pub mod jsonrpc;
pub mod logging;
pub mod registry;
pub mod runner;

// Re-export key types
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use jsonrpc::{Request, Response};
pub use registry::{NoParams, Registry, Service, ServiceBuilder};
pub use runner::{run, run_with_config};

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// Input/output error
    Io(std::io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Positional arguments did not match the handler's parameters
    InvalidParam(String),
    /// Failure raised by a service method
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidParam(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidParam(_) => None,
            Error::Other(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Type alias for library results
pub type Result<T> = std::result::Result<T, Error>;
