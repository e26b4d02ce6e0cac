//! Locations of the request and response files.

use std::path::{Path, PathBuf};

/// Default request file name, relative to the working directory
pub const REQUEST_FILE: &str = "service_req.json";

/// Default response file name, relative to the working directory
pub const RESPONSE_FILE: &str = "service_resp.json";

/// Where a run reads its request and writes its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the request file
    pub request_path: PathBuf,
    /// Path of the response file
    pub response_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_path: PathBuf::from(REQUEST_FILE),
            response_path: PathBuf::from(RESPONSE_FILE),
        }
    }
}

impl Config {
    /// Use the default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            request_path: dir.join(REQUEST_FILE),
            response_path: dir.join(RESPONSE_FILE),
        }
    }
}
