// src/error.rs

//! Unified error handling for the catalog scraper and query service.

use std::fmt;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV reading/writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Category discovery error
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A listing entry did not have the expected structure
    #[error("Extraction error for {field}: {message}")]
    Extract { field: String, message: String },

    /// Crawling error
    #[error("Crawl error for {context}: {message}")]
    Crawl { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }

    /// Create an extraction error for a single field of a listing entry.
    pub fn extract(field: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create a crawl error with context.
    pub fn crawl(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Crawl {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Errors surfaced by catalog queries.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The source file could not be loaded; never the caller's fault.
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(#[source] AppError),

    /// No record carries the requested id in the current load.
    #[error("No book with id {0}")]
    NotFound(i64),
}

impl From<AppError> for QueryError {
    fn from(error: AppError) -> Self {
        Self::DataUnavailable(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let err = AppError::extract("price", "no digits in ''");
        assert_eq!(err.to_string(), "Extraction error for price: no digits in ''");
    }

    #[test]
    fn test_load_failure_becomes_data_unavailable() {
        let err: QueryError = AppError::validation("bad row").into();
        assert!(matches!(err, QueryError::DataUnavailable(_)));
    }
}
