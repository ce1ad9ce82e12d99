//! Retry extension.
//!
//! Wraps the client with `reqwest-retry`'s transient failure middleware, so
//! connection errors, timeouts, 5xx and 429 responses are retried with an
//! exponential backoff bounded by the configured wait window.

use std::sync::Arc;
use std::time::Duration;

use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tracing::debug;

use super::{BoxError, ClientOverride, Extension};
use crate::http::HttpClient;

/// Retries transient failures with exponential backoff.
///
/// ```rust
/// use std::time::Duration;
/// use volley::extension::RetryExtension;
///
/// let plan = volley::get("http://localhost/").with(RetryExtension {
///     retry_max: 3,
///     retry_wait_min: Duration::from_millis(100),
///     retry_wait_max: Duration::from_secs(2),
/// });
/// assert_eq!(plan.client_override_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExtension {
    /// Number of retries after the first attempt.
    pub retry_max: u32,
    /// Shortest wait between two attempts.
    pub retry_wait_min: Duration,
    /// Longest wait between two attempts.
    pub retry_wait_max: Duration,
}

impl Default for RetryExtension {
    fn default() -> Self {
        Self {
            retry_max: 3,
            retry_wait_min: Duration::from_secs(1),
            retry_wait_max: Duration::from_secs(30),
        }
    }
}

impl ClientOverride for RetryExtension {
    fn override_client(&self, client: HttpClient) -> Result<HttpClient, BoxError> {
        if self.retry_wait_min > self.retry_wait_max {
            return Err(format!(
                "retry wait min {:?} exceeds retry wait max {:?}",
                self.retry_wait_min, self.retry_wait_max
            )
            .into());
        }

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(self.retry_wait_min, self.retry_wait_max)
            .build_with_max_retries(self.retry_max);

        debug!(retries = self.retry_max, "Adding retry middleware");
        Ok(client.with(RetryTransientMiddleware::new_with_policy(retry_policy)))
    }
}

impl Extension for RetryExtension {
    fn client_override(self: Arc<Self>) -> Option<Arc<dyn ClientOverride>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_pushes_retry_layer() {
        let extension = RetryExtension {
            retry_max: 10,
            retry_wait_min: Duration::from_secs(5),
            retry_wait_max: Duration::from_secs(10),
        };
        let before = HttpClient::new().middleware_len();
        let client = extension.override_client(HttpClient::new()).unwrap();
        assert_eq!(client.middleware_len(), before + 1);
        assert!(client.build().is_ok());
    }

    #[test]
    fn test_inverted_wait_window_is_rejected() {
        let extension = RetryExtension {
            retry_max: 1,
            retry_wait_min: Duration::from_secs(10),
            retry_wait_max: Duration::from_secs(1),
        };
        let err = extension.override_client(HttpClient::new()).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_retry_applies_to_prebuilt_client() {
        let client = HttpClient::from_reqwest(reqwest::Client::new());
        let client = RetryExtension::default().override_client(client).unwrap();
        assert!(client.is_prebuilt());
        assert_eq!(client.middleware_len(), 2);
    }
}
