//! Error handling for volley.
//!
//! Every stage of request execution has its own variant so callers can tell
//! where a request failed: building the plan, encoding the body, running an
//! extension, constructing the request, talking to the server, reading the
//! body, enforcing the status policy, or decoding the response.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::extension::BoxError;

/// The middleware stage an extension failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Rewriting the HTTP client.
    Client,
    /// Rewriting the outgoing request.
    Request,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Client => f.write_str("client override"),
            Stage::Request => f.write_str("request override"),
        }
    }
}

/// Errors that can happen when executing a request plan.
#[derive(Error, Debug)]
pub enum Error {
    /// The plan itself could not be built.
    ///
    /// Returned for malformed URL templates and for option functions that
    /// fail while being applied.
    #[error("options error: {0}")]
    InvalidOption(String),

    /// The JSON body could not be serialized.
    #[error("request json body encode error")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// An extension refused to rewrite the client or the request.
    ///
    /// Always returned before any network call is made.
    #[error("{stage} error")]
    Middleware {
        /// Stage the failing extension ran in.
        stage: Stage,
        #[source]
        source: BoxError,
    },

    /// The HTTP client could not be built from its configuration.
    #[error("http client build error")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// The method, URL, or a header could not be turned into a request.
    #[error("new request error: {0}")]
    RequestConstruction(String),

    /// The network call itself failed (DNS, connection, TLS, timeout).
    #[error("do request error")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The response body could not be read.
    #[error("read response body error")]
    BodyRead {
        #[source]
        source: reqwest::Error,
    },

    /// The response status violates the configured ok/fail codes.
    ///
    /// Carries at most the first 50 bytes of the body.
    #[error("http status {status}: {snippet}")]
    Status {
        /// Status returned by the server.
        status: StatusCode,
        /// Leading bytes of the response body.
        snippet: String,
    },

    /// The response body could not be decoded into the JSON output target.
    #[error("json unmarshal error")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns the response status for [`Error::Status`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the middleware stage for [`Error::Middleware`].
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Middleware { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for operations that can fail with a volley error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_contains_status_line() {
        let err = Error::Status {
            status: StatusCode::FORBIDDEN,
            snippet: "denied".into(),
        };
        assert_eq!(err.to_string(), "http status 403 Forbidden: denied");
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_middleware_keeps_source() {
        use std::error::Error as _;

        let err = Error::Middleware {
            stage: Stage::Request,
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "request override error");
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".into()));
        assert_eq!(err.stage(), Some(Stage::Request));
    }
}
