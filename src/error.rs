//! Error handling for the passdown dashboard
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for passdown dashboard operations
#[derive(Error, Debug)]
pub enum PassdownError {
    /// Transport-level HTTP failures (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code
    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered `success: false` or an error payload
    #[error("API error: {0}")]
    Api(String),

    /// The backend answered successfully but without usable data
    #[error("No repeatability data available")]
    EmptyDataset,

    /// A second request was issued while one was still in flight
    #[error("{0} already in progress")]
    Busy(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Errors related to download file names and destinations
    #[error("Download error: {0}")]
    Download(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PassdownError>,
    },
}

impl PassdownError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PassdownError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for PassdownError {
    fn from(err: serde_json::Error) -> Self {
        PassdownError::Serialization(err.to_string())
    }
}

/// Result type alias for passdown dashboard operations
pub type Result<T> = std::result::Result<T, PassdownError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PassdownError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| PassdownError::from(e).with_context(f()))
    }
}
