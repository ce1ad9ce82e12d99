//! Buffered response returned by a successful execution.

use bytes::Bytes;
use reqwest::{header::HeaderMap, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, url: Url, body: Bytes) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    /// Get the response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the final URL, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the response body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Get the response body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| Error::Decode { source })
    }

    /// Consume the response and return its body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }
}
