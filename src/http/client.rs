//! HTTP client setup and middleware configuration.
//!
//! This module provides the [`HttpClient`] value that flows through client
//! overrides before every request, and the [`HttpClientConfig`] it is built
//! from. A client is either configured by this crate (proxy, default headers,
//! timeout) or a prebuilt `reqwest::Client` supplied by the caller. Both carry
//! an ordered stack of `reqwest-middleware` layers.
//!
//! # Examples
//!
//! ## Basic Client Creation
//!
//! ```rust
//! use volley::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Custom Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use volley::http::{HttpClient, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     proxy: None,
//!     headers: Some(headers),
//!     timeout: Some(Duration::from_secs(10)),
//! };
//!
//! let client = HttpClient::from_config(config).build()?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Total timeout applied to every request.
    pub timeout: Option<Duration>,
}

impl HttpClientConfig {
    fn into_reqwest(self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();

        if let Some(proxy) = self.proxy {
            builder = builder.proxy(proxy);
        }

        if let Some(headers) = self.headers {
            builder = builder.default_headers(headers);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}

enum Transport {
    Configured(HttpClientConfig),
    Prebuilt(reqwest::Client),
}

/// The client a request plan executes against.
///
/// Client overrides receive one of these and return a replacement, so they
/// can reconfigure the transport or push extra middleware layers.
pub struct HttpClient {
    transport: Transport,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Default for HttpClient {
    /// A configured client with default settings and request tracing.
    fn default() -> Self {
        Self::from_config(HttpClientConfig::default())
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("HttpClient");
        match &self.transport {
            Transport::Configured(config) => s.field("config", config),
            Transport::Prebuilt(client) => s.field("prebuilt", client),
        };
        s.field("middleware", &self.middleware.len()).finish()
    }
}

impl HttpClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client from a configuration, with request tracing enabled.
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self {
            transport: Transport::Configured(config),
            middleware: Vec::new(),
        }
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
    }

    /// Wraps a caller-owned `reqwest::Client`, with request tracing enabled.
    ///
    /// A prebuilt client's transport cannot be reconfigured, so
    /// [`config_mut`](Self::config_mut) returns `None` for it.
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self {
            transport: Transport::Prebuilt(client),
            middleware: Vec::new(),
        }
        .with(TracingMiddleware::default())
    }

    /// Pushes a middleware layer. Layers run in the order they were added.
    pub fn with<M: Middleware>(self, middleware: M) -> Self {
        self.with_arc(Arc::new(middleware))
    }

    /// Pushes a shared middleware layer.
    pub fn with_arc(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Gets the client configuration, unless the client is prebuilt.
    pub fn config(&self) -> Option<&HttpClientConfig> {
        match &self.transport {
            Transport::Configured(config) => Some(config),
            Transport::Prebuilt(_) => None,
        }
    }

    /// Gets the mutable client configuration, unless the client is prebuilt.
    pub fn config_mut(&mut self) -> Option<&mut HttpClientConfig> {
        match &mut self.transport {
            Transport::Configured(config) => Some(config),
            Transport::Prebuilt(_) => None,
        }
    }

    /// Gets whether the client wraps a caller-supplied `reqwest::Client`.
    pub fn is_prebuilt(&self) -> bool {
        matches!(self.transport, Transport::Prebuilt(_))
    }

    /// Gets the number of middleware layers, tracing included.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Builds the client with its middleware stack.
    pub fn build(self) -> Result<ClientWithMiddleware, reqwest::Error> {
        let inner = match self.transport {
            Transport::Configured(config) => config.into_reqwest()?,
            Transport::Prebuilt(client) => client,
        };

        let client = self
            .middleware
            .into_iter()
            .fold(ClientBuilder::new(inner), |builder, middleware| {
                builder.with_arc(middleware)
            })
            .build();

        Ok(client)
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// This is a shortcut for `HttpClient::from_config(config).build()`: the
/// resulting client traces every request and applies the optional proxy,
/// default headers and timeout.
///
/// # Example
///
/// ```rust
/// use volley::http::client::{create_http_client, HttpClientConfig};
///
/// let config = HttpClientConfig::default();
/// let client = create_http_client(config).unwrap();
/// ```
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    HttpClient::from_config(config).build()
}
