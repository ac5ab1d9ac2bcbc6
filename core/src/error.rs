//! Error types for the employee API client.
//!
//! # Design
//! The three status classes the client reacts to each get a variant:
//! `Unauthorized` (the session has been cleared), `NotFound` (the user has
//! been told the service is unavailable) and `Http` for every other non-2xx
//! status. The remaining variants cover transport and serde failures.

use thiserror::Error;

/// Errors returned by `EmployeeClient` parse methods and `EmployeeService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401. The session flag is already cleared.
    #[error("not logged in")]
    Unauthorized,

    /// The server returned 404.
    #[error("service is not available")]
    NotFound,

    /// The server returned a non-2xx status other than 401 and 404.
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised while reading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failure to execute a request at all (connection refused, DNS, TLS).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while resolving a navigation path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0:?}")]
    NoMatch(String),

    #[error("redirect loop while resolving {0:?}")]
    RedirectLoop(String),
}
