//! HTTP client functionality.
//!
//! This module provides the client that request plans execute against. It
//! handles client creation with tracing, proxy support, default headers and
//! timeouts, and lets client overrides stack extra `reqwest-middleware`
//! layers such as retries.
//!
//! # Examples
//!
//! ```rust
//! use volley::http::HttpClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new().build()?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClient, HttpClientConfig};
