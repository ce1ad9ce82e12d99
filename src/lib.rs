//! Volley is a crate aiming at providing a fluent way to describe, send and
//! check HTTP requests, with extensions that rewrite the client and the
//! request before anything is sent.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde::Deserialize;
//! use volley::{Error, RetryExtension};
//!
//! #[derive(Deserialize, Default)]
//! struct Book {
//!     title: String,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let mut book = Book::default();
//! volley::get("http://localhost:8000/books/7")
//!     .header("accept", "application/json")
//!     .fail_codes([404, 500])
//!     .with(RetryExtension::default())
//!     .response_json(&mut book)
//!     .execute()
//!     .await?;
//! println!("{}", book.title);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The volley crate is organized into several modules:
//!
//! - [`requests`] - The `RequestPlan` builder, its executor and the method shortcuts
//! - [`options`] - The same requests described as a list of option functions
//! - [`extension`] - Client and request overrides, with the retry and proxy extensions
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client configuration and middleware stacking
//! - [`utils`] - Status policy and URL templating helpers

pub mod error;
pub mod extension;
pub mod http;
pub mod options;
pub mod requests;
pub mod utils;

pub use error::{Error, Result, Stage};
pub use extension::{
    client_fn, request_fn, BoxError, ClientOverride, Extension, ProxiesExtension, RequestOverride,
    RetryExtension,
};
pub use http::{create_http_client, HttpClient, HttpClientConfig};
pub use requests::{
    connect, delete, get, head, options, patch, post, put, requests, trace, Cookie, JsonSlot,
    Output, OutputKind, RequestPlan, Response,
};
