//! Error types for the Wetpaint client

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by the service itself
///
/// Both the structured `response/failure` envelope and the generic HTML
/// error page are normalized into this shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("service call failed - cause: {cause}, messages: {}", .messages.join(", "))]
pub struct CallError {
    /// Short description of what went wrong
    pub cause: String,
    /// Detail messages in document order
    pub messages: Vec<String>,
}

impl CallError {
    /// Create a new call error
    pub fn new(cause: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            cause: cause.into(),
            messages,
        }
    }
}

/// Errors that can occur when using the Wetpaint client
#[derive(Error, Debug)]
pub enum WetpaintError {
    /// HTTP request failed, including while reading the response body
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A call path does not resolve to a location on the configured server
    #[error("Invalid call path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The service returned a failure payload
    #[error(transparent)]
    Call(#[from] CallError),

    /// A successful response did not contain the expected field
    #[error("Response is missing expected field `{selector}`")]
    MissingField {
        /// Selector that matched nothing
        selector: &'static str,
    },

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl WetpaintError {
    /// Returns the service failure if this error carries one
    pub fn as_call_error(&self) -> Option<&CallError> {
        match self {
            WetpaintError::Call(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors raised while loading a [`ServiceConfig`](crate::ServiceConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings document is not valid YAML or has the wrong shape
    #[error("Invalid settings document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Requested environment is not present in the settings document
    #[error("No settings for environment `{0}`")]
    UnknownEnvironment(String),

    /// A required setting is absent or blank
    #[error("Missing required setting `{0}`")]
    MissingField(&'static str),

    /// The server setting does not form a valid URL
    #[error("Invalid server `{server}`: {reason}")]
    InvalidServer { server: String, reason: String },
}
