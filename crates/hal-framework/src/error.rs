//! # Framework Errors
//!
//! This module defines the common error types used throughout the HAL framework.
//! Configuration mistakes (bad templates, duplicate endpoints, arity mismatches) and
//! failures raised by resource producers all surface as a [`HalError`], so the
//! request-handling layer only has one type to map onto an error response.

/// Boxed error returned by resource producers and pre-render hooks.
///
/// Resource authors are free to use their own error enums; anything that implements
/// `std::error::Error + Send + Sync` converts into this with `?`.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by resource producers.
pub type ProducerResult<T> = Result<T, ProducerError>;

/// Errors that can occur within the HAL framework itself.
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    #[error("Malformed URL template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    #[error("Resource '{0}' was registered without a URL")]
    MissingUrl(String),

    #[error("Endpoint already registered: {0}")]
    DuplicateEndpoint(String),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Embedded resource type is not registered: {0}")]
    UnregisteredResource(&'static str),

    #[error(
        "Embedded resource type {resource} is registered under several endpoints: {endpoints:?}"
    )]
    AmbiguousResource {
        resource: &'static str,
        endpoints: Vec<String>,
    },

    #[error("Template '{template}' takes {expected} positional parameters, got {actual}")]
    ArityMismatch {
        template: String,
        expected: usize,
        actual: usize,
    },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Embedding nested deeper than the configured limit of {0} levels")]
    NestingLimitExceeded(u32),

    #[error("Invalid configuration value for {key}: '{value}'")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Resource data must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Producer for endpoint '{endpoint}' failed: {source}")]
    Producer {
        endpoint: String,
        #[source]
        source: ProducerError,
    },

    #[error("Pre-render hook for endpoint '{endpoint}' failed: {source}")]
    PreRender {
        endpoint: String,
        #[source]
        source: ProducerError,
    },
}

/// Helper type alias for Result using HalError.
pub type HalResult<T> = Result<T, HalError>;
