// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Crate-wide error type for configuration, persistence, and API failures.
///
/// Download-specific errors live in [`crate::download`] because their
/// handling policy (degrade to a browser open) differs from everything else.
#[derive(Debug, Clone)]
pub enum Error {
    /// Transport-level HTTP failure (connection, TLS, unexpected status).
    Http(String),
    /// A response body could not be decoded into the expected shape.
    Decode(String),
    /// Configuration could not be read or written.
    Config(String),
    /// Filesystem failure outside of downloads (state file, directories).
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
