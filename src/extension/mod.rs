//! Extensions rewrite the client and the request before execution.
//!
//! An extension may offer either of two capabilities:
//!
//! - [`ClientOverride`] receives the current [`HttpClient`] and returns a
//!   replacement, e.g. one with retry middleware or a proxy.
//! - [`RequestOverride`] receives the fully built `reqwest::Request` and
//!   returns a replacement, e.g. with signed headers.
//!
//! Capabilities are discovered once, when the extension is registered with
//! [`RequestPlan::with`](crate::RequestPlan::with), through the two queries on
//! [`Extension`]. An extension reporting neither capability is ignored.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use volley::extension::{BoxError, ClientOverride, Extension};
//! use volley::http::HttpClient;
//!
//! struct Timeout;
//!
//! impl ClientOverride for Timeout {
//!     fn override_client(&self, mut client: HttpClient) -> Result<HttpClient, BoxError> {
//!         if let Some(config) = client.config_mut() {
//!             config.timeout = Some(std::time::Duration::from_secs(3));
//!         }
//!         Ok(client)
//!     }
//! }
//!
//! impl Extension for Timeout {
//!     fn client_override(self: Arc<Self>) -> Option<Arc<dyn ClientOverride>> {
//!         Some(self)
//!     }
//! }
//!
//! let plan = volley::get("http://localhost/").with(Timeout);
//! assert_eq!(plan.client_override_count(), 1);
//! ```

pub mod proxy;
pub mod retry;

use std::fmt;
use std::sync::Arc;

use crate::http::HttpClient;

pub use proxy::ProxiesExtension;
pub use retry::RetryExtension;

/// Error type returned by extensions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Rewrites the client a request will be sent with.
pub trait ClientOverride: Send + Sync {
    /// Returns the client to use instead of `client`.
    fn override_client(&self, client: HttpClient) -> Result<HttpClient, BoxError>;
}

/// Rewrites the request right before it is sent.
pub trait RequestOverride: Send + Sync {
    /// Returns the request to send instead of `request`.
    fn override_request(&self, request: reqwest::Request) -> Result<reqwest::Request, BoxError>;
}

/// A middleware registration, queried for its capabilities.
///
/// Both queries default to `None`; implement the ones the extension
/// supports by returning `Some(self)`.
pub trait Extension: Send + Sync + 'static {
    /// The client rewriting capability, if any.
    fn client_override(self: Arc<Self>) -> Option<Arc<dyn ClientOverride>> {
        None
    }

    /// The request rewriting capability, if any.
    fn request_override(self: Arc<Self>) -> Option<Arc<dyn RequestOverride>> {
        None
    }
}

/// Ordered client and request overrides collected from extensions.
#[derive(Default, Clone)]
pub(crate) struct Chain {
    pub(crate) clients: Vec<Arc<dyn ClientOverride>>,
    pub(crate) requests: Vec<Arc<dyn RequestOverride>>,
}

impl Chain {
    /// Registers every capability the extension reports.
    pub(crate) fn register<E: Extension + ?Sized>(&mut self, extension: Arc<E>) {
        if let Some(client) = Arc::clone(&extension).client_override() {
            self.clients.push(client);
        }
        if let Some(request) = extension.request_override() {
            self.requests.push(request);
        }
    }

    pub(crate) fn apply_client(&self, client: HttpClient) -> Result<HttpClient, BoxError> {
        self.clients
            .iter()
            .try_fold(client, |client, ext| ext.override_client(client))
    }

    pub(crate) fn apply_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Request, BoxError> {
        self.requests
            .iter()
            .try_fold(request, |request, ext| ext.override_request(request))
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("clients", &self.clients.len())
            .field("requests", &self.requests.len())
            .finish()
    }
}

/// Client override backed by a closure. See [`client_fn`].
pub struct ClientFn<F>(F);

/// Request override backed by a closure. See [`request_fn`].
pub struct RequestFn<F>(F);

/// Turns a closure into an extension that rewrites the client.
///
/// ```rust
/// use volley::extension::client_fn;
///
/// let plan = volley::get("http://localhost/").with(client_fn(|client| Ok(client)));
/// assert_eq!(plan.client_override_count(), 1);
/// ```
pub fn client_fn<F>(f: F) -> ClientFn<F>
where
    F: Fn(HttpClient) -> Result<HttpClient, BoxError> + Send + Sync + 'static,
{
    ClientFn(f)
}

/// Turns a closure into an extension that rewrites the request.
pub fn request_fn<F>(f: F) -> RequestFn<F>
where
    F: Fn(reqwest::Request) -> Result<reqwest::Request, BoxError> + Send + Sync + 'static,
{
    RequestFn(f)
}

impl<F> ClientOverride for ClientFn<F>
where
    F: Fn(HttpClient) -> Result<HttpClient, BoxError> + Send + Sync,
{
    fn override_client(&self, client: HttpClient) -> Result<HttpClient, BoxError> {
        (self.0)(client)
    }
}

impl<F> Extension for ClientFn<F>
where
    F: Fn(HttpClient) -> Result<HttpClient, BoxError> + Send + Sync + 'static,
{
    fn client_override(self: Arc<Self>) -> Option<Arc<dyn ClientOverride>> {
        Some(self)
    }
}

impl<F> RequestOverride for RequestFn<F>
where
    F: Fn(reqwest::Request) -> Result<reqwest::Request, BoxError> + Send + Sync,
{
    fn override_request(&self, request: reqwest::Request) -> Result<reqwest::Request, BoxError> {
        (self.0)(request)
    }
}

impl<F> Extension for RequestFn<F>
where
    F: Fn(reqwest::Request) -> Result<reqwest::Request, BoxError> + Send + Sync + 'static,
{
    fn request_override(self: Arc<Self>) -> Option<Arc<dyn RequestOverride>> {
        Some(self)
    }
}
